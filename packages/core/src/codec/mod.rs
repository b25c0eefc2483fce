//! Codec Family
//!
//! One codec per data shape. Each marshals validated inputs into the shape its
//! provider expects and unmarshals the result:
//!
//! - [`block`]: fixed-size binary buffers, PKCS#7 padding, Base64 output
//! - [`text`]: string-in/string-out classical ciphers
//! - [`numeric`]: unbounded decimal integers and `"(x, y)"` curve points

pub mod block;
pub mod buffer;
pub mod numeric;
pub mod text;

pub use block::BlockCodec;
pub use buffer::ScopedBuffer;
pub use numeric::{CurveKeyPair, CurvePoint, EciesCodec, RsaCodec, RsaKey, RsaKeys};
pub use text::{ClassicalKey, TextCodec};
