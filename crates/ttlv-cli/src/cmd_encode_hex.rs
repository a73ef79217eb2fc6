/// Implementation of `ttlv encode-hex`.
///
/// Prints a binary file as uppercase hex, 16 bytes per line, in a form
/// `--hex` accepts back. The bytes are not decoded, so malformed
/// messages can be dumped too.
use anyhow::Result;
use ttlv_wire::encode_hex;

use crate::{EncodeHexArgs, read_bytes};

const BYTES_PER_LINE: usize = 16;

/// Run the `ttlv encode-hex` command.
///
/// # Errors
///
/// Returns an error if the file cannot be read.
pub fn run(args: &EncodeHexArgs) -> Result<()> {
    let bytes = read_bytes(&args.file)?;
    for line in bytes.chunks(BYTES_PER_LINE) {
        println!("{}", encode_hex(line));
    }
    Ok(())
}
