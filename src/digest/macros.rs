macro_rules! define_digest {
    ($digest:ident, $size:expr) => {
        #[derive(Copy, Clone, PartialEq, Eq, Hash)]
        pub struct $digest([u8; $size]);

        impl $digest {
            pub fn into_bytes(self) -> [u8; $size] {
                self.0
            }

            /// Lowercase hex with a leading `0x`.
            pub fn to_prefixed_hex(&self) -> String {
                format!("0x{:x}", self)
            }
        }

        impl AsRef<[u8]> for $digest {
            fn as_ref(&self) -> &[u8] {
                &self.0
            }
        }

        impl From<[u8; $size]> for $digest {
            fn from(bytes: [u8; $size]) -> Self {
                $digest(bytes)
            }
        }

        impl From<$digest> for Box<[u8]> {
            fn from(digest: $digest) -> Self {
                Box::new(digest.0)
            }
        }

        impl ::std::fmt::Debug for $digest {
            fn fmt(&self, f: &mut ::std::fmt::Formatter) -> ::std::fmt::Result {
                write!(f, "{}(\"{:x}\")", stringify!($digest), self)
            }
        }

        impl ::std::fmt::LowerHex for $digest {
            fn fmt(&self, f: &mut ::std::fmt::Formatter) -> ::std::fmt::Result {
                f.write_str(&::hex::encode(self.0))
            }
        }

        impl ::std::fmt::Display for $digest {
            fn fmt(&self, f: &mut ::std::fmt::Formatter) -> ::std::fmt::Result {
                ::std::fmt::LowerHex::fmt(self, f)
            }
        }

        impl ::std::str::FromStr for $digest {
            type Err = $crate::error::Error;

            fn from_str(s: &str) -> Result<Self, Self::Err> {
                let digits = s.strip_prefix("0x").unwrap_or(s);
                let mut bytes = [0; $size];
                ::hex::decode_to_slice(digits, &mut bytes)
                    .map_err(|e| $crate::error::Error::InvalidHex(format!("{:?}: {}", s, e)))?;
                Ok($digest(bytes))
            }
        }

        impl $crate::digest::Digest for $digest {}
    }
}

macro_rules! define_chunk {
    ($chunk:ident, $size:expr) => {
        #[derive(Copy, Clone, PartialEq, Eq)]
        pub struct $chunk([u8; $size]);

        impl AsMut<[u8]> for $chunk {
            fn as_mut(&mut self) -> &mut [u8] {
                &mut self.0
            }
        }

        impl AsRef<[u8]> for $chunk {
            fn as_ref(&self) -> &[u8] {
                &self.0
            }
        }

        impl ::std::fmt::Debug for $chunk {
            fn fmt(&self, f: &mut ::std::fmt::Formatter) -> ::std::fmt::Result {
                f.write_str(&::hex::encode(self.0))
            }
        }

        impl $crate::digest::chunked::Chunk for $chunk {
            const LEN: usize = $size;

            fn new() -> Self {
                $chunk([0; $size])
            }
        }
    }
}
