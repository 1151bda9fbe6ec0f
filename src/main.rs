// The engine is the `ferrite_ann` library; this binary only points at the demo:
//   cargo run --example xor
fn main() {
    println!("ferrite-ann {}", env!("CARGO_PKG_VERSION"));
    println!("standard, sparse and shortcut feedforward networks, incremental backpropagation");
    println!("try `cargo run --example xor`");
}
