// This binary crate is intentionally minimal.
// All loss-operator logic lives in the library (src/lib.rs and its modules).
// Run demos with:
//   cargo run --example softmax_log
fn main() {
    println!("convloss: classification and regression losses for batched prediction tensors.");
    println!("Run `cargo run --example softmax_log` or `cargo run --example segmentation`.");
}
