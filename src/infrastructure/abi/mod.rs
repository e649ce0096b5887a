//! ABI infrastructure - loading contract ABI files from disk

mod scanner;

pub use scanner::{load_abi_file, AbiScanner, ScanReport, ScannedAbi};
