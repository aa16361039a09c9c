fn main() {
    println!("hello, world");
}

fn helper() {}
