use derive_more::Display;
use fnv::FnvHasher;
use serde::{Deserialize, Deserializer, Serialize, Serializer};
use std::hash::{Hash, Hasher};

/// Seed for a world's RNG.
///
/// Seeds can be given either as an unsigned integer or as arbitrary text.
/// Text that parses as a `u64` is treated as that integer, so `"42"` and `42`
/// are the same seed. Any other text is kept as-is and hashed (FNV-1a) when
/// the seed is used, which lets people name their worlds.
///
/// Seeds are always **serialized as strings**. TOML and JSON can't reliably
/// hold the full `u64` range, and a stringified integer parses back into the
/// same integer.
#[derive(Clone, Debug, Display, PartialEq, Eq)]
pub enum Seed {
    /// An integer seed, which can be used directly
    Int(u64),
    /// A textual seed, which will be hashed into a u64 before use
    Text(String),
}

impl Seed {
    /// Convert the seed to a `u64`, so it can actually be fed to an RNG
    pub fn to_u64(&self) -> u64 {
        match self {
            Self::Int(seed) => *seed,
            Self::Text(text) => {
                let mut hasher = FnvHasher::default();
                text.hash(&mut hasher);
                hasher.finish()
            }
        }
    }
}

impl From<u64> for Seed {
    fn from(seed: u64) -> Self {
        Self::Int(seed)
    }
}

impl From<&str> for Seed {
    fn from(seed: &str) -> Self {
        match seed.parse::<u64>() {
            Ok(seed) => Self::Int(seed),
            Err(_) => Self::Text(seed.into()),
        }
    }
}

impl Serialize for Seed {
    fn serialize<S: Serializer>(
        &self,
        serializer: S,
    ) -> Result<S::Ok, S::Error> {
        serializer.serialize_str(&self.to_string())
    }
}

/// Wire shape of a seed. Only used to funnel both input forms through
/// [Seed::from].
#[derive(Deserialize)]
#[serde(untagged)]
enum SeedInput {
    Int(u64),
    Text(String),
}

impl<'de> Deserialize<'de> for Seed {
    fn deserialize<D: Deserializer<'de>>(
        deserializer: D,
    ) -> Result<Self, D::Error> {
        Ok(match SeedInput::deserialize(deserializer)? {
            SeedInput::Int(seed) => Self::Int(seed),
            SeedInput::Text(text) => text.as_str().into(),
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_test::{
        assert_de_tokens, assert_de_tokens_error, assert_ser_tokens, Token,
    };

    #[test]
    fn test_from_str() {
        assert_eq!(Seed::from("0"), Seed::Int(0));
        assert_eq!(Seed::from("9000"), Seed::Int(9000));
        // Not a u64, so we keep the text
        assert_eq!(Seed::from("-1"), Seed::Text("-1".into()));
        assert_eq!(Seed::from("brine"), Seed::Text("brine".into()));
    }

    #[test]
    fn test_to_u64() {
        assert_eq!(Seed::Int(0).to_u64(), 0);
        assert_eq!(Seed::Int(9000).to_u64(), 9000);

        // Text is hashed, and the hash is stable
        assert_eq!(Seed::Text("-1".into()).to_u64(), 16020590405669718844);
        assert_eq!(
            Seed::Text("potato".into()).to_u64(),
            Seed::Text("potato".into()).to_u64()
        );
        assert_ne!(
            Seed::Text("potato".into()).to_u64(),
            Seed::Text("potatoes".into()).to_u64()
        );
    }

    #[test]
    fn test_serialize() {
        assert_ser_tokens(&Seed::Int(9000), &[Token::String("9000")]);
        assert_ser_tokens(
            &Seed::Text("brine".into()),
            &[Token::String("brine")],
        );
    }

    #[test]
    fn test_deserialize() {
        assert_de_tokens(&Seed::Int(9000), &[Token::U64(9000)]);
        assert_de_tokens(&Seed::Int(9000), &[Token::Str("9000")]);
        assert_de_tokens(&Seed::Text("brine".into()), &[Token::Str("brine")]);

        assert_de_tokens_error::<Seed>(
            &[Token::I32(-1)],
            "data did not match any variant of untagged enum SeedInput",
        );
        assert_de_tokens_error::<Seed>(
            &[Token::Bool(false)],
            "data did not match any variant of untagged enum SeedInput",
        );
    }
}
