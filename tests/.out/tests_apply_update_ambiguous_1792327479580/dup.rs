fn one() {
    let total = compute();
    println!("{total}");
}

fn two() {
    let total = compute();
    println!("{total}");
}
