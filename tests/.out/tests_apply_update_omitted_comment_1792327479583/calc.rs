fn calc() {
    let a = 10;
    let b = a + 20;
    b
}
