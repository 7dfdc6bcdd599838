//! Shareable portfolio links.
//!
//! A portfolio is shared by embedding its holdings in a URL query parameter
//! as `base64(percent-encode(json))`, the format browsers produce with
//! `btoa(encodeURIComponent(JSON.stringify(holdings)))`.

mod share_codec;

pub use share_codec::*;
