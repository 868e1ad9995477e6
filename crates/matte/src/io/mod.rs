pub mod codec;
pub mod report;

pub use codec::{decode, decode_bytes, encode, encode_to_vec, OutputFormat};
pub use report::{Base64Reporter, BASE64_END, BASE64_START};
