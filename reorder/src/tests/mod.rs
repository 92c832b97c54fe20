extern crate std;

mod errors;
