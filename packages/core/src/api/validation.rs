// Валидация входящих данных
//
// Runs before any provider is resolved or buffer acquired. Each rule rejects
// with its own ValidationError variant.

use crate::api::request::{Action, KeyMaterial};
use crate::codec::{ClassicalKey, CurvePoint, RsaKey};
use crate::config::Config;
use crate::crypto::descriptor::{Algorithm, Family, KeyShape};
use crate::error::ValidationError;
use crate::utils::decimal::{parse_positive, parse_unsigned};
use num_bigint::BigUint;

type Result<T> = std::result::Result<T, ValidationError>;

/// Key material after validation, shaped for the codec that will use it.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ValidatedKey {
    Block(String),
    Classical(ClassicalKey),
    Rsa(RsaKey),
    EciesPublic(CurvePoint),
    EciesPrivate(BigUint),
}

pub fn validate_text(text: &str) -> Result<()> {
    if text.is_empty() {
        return Err(ValidationError::EmptyText);
    }
    Ok(())
}

/// Validates `key` against the algorithm's key shape for `action`.
pub fn validate_key(algorithm: Algorithm, action: Action, key: &KeyMaterial) -> Result<ValidatedKey> {
    let descriptor = algorithm.descriptor();
    // Exchange algorithms take no encrypt/decrypt key material.
    if descriptor.family == Family::Exchange {
        return Err(ValidationError::KeyShapeMismatch(algorithm));
    }

    match (descriptor.key_shape, key) {
        (KeyShape::FixedBytes(block_size), KeyMaterial::Secret(secret)) => {
            validate_block_key(secret, block_size).map(|()| ValidatedKey::Block(secret.clone()))
        }
        (KeyShape::Keyword, KeyMaterial::Secret(secret)) => validate_keyword(secret)
            .map(|()| ValidatedKey::Classical(ClassicalKey::Keyword(secret.clone()))),
        (KeyShape::RailCount, KeyMaterial::Secret(secret)) => {
            validate_rail_count(secret).map(|rails| ValidatedKey::Classical(ClassicalKey::Rails(rails)))
        }
        (KeyShape::RsaTriple, KeyMaterial::Rsa { n, e, d }) => {
            validate_rsa(action, n, e, d.as_deref()).map(ValidatedKey::Rsa)
        }
        (KeyShape::CurvePoint, KeyMaterial::Ecies { public, private }) => {
            validate_ecies(action, public.as_deref(), private.as_deref())
        }
        _ => Err(ValidationError::KeyShapeMismatch(algorithm)),
    }
}

/// Block keys must be exactly `block_size` bytes.
pub fn validate_block_key(key: &str, block_size: usize) -> Result<()> {
    if key.is_empty() {
        return Err(ValidationError::MissingKey);
    }
    if key.len() != block_size {
        return Err(ValidationError::KeyLength {
            expected: block_size,
            actual: key.len(),
        });
    }
    Ok(())
}

/// `^[A-Za-z]+$`
pub fn validate_keyword(key: &str) -> Result<()> {
    if key.is_empty() {
        return Err(ValidationError::MissingKey);
    }
    if !key.bytes().all(|b| b.is_ascii_alphabetic()) {
        return Err(ValidationError::NonAlphabeticKeyword);
    }
    Ok(())
}

pub fn validate_rail_count(raw: &str) -> Result<usize> {
    let trimmed = raw.trim();
    if trimmed.is_empty() {
        return Err(ValidationError::MissingKey);
    }
    if !trimmed.bytes().all(|b| b.is_ascii_digit()) {
        return Err(ValidationError::RailCountNotNumeric);
    }
    let max = Config::global().max_rails();
    // Digits only, so a parse failure can only be overflow.
    let rails = trimmed
        .parse::<usize>()
        .map_err(|_| ValidationError::RailCountTooLarge { max })?;
    if rails < 2 {
        return Err(ValidationError::RailCountTooSmall(rails));
    }
    if rails > max {
        return Err(ValidationError::RailCountTooLarge { max });
    }
    Ok(rails)
}

/// `n` and `e` always, `d` for decryption. All must be positive integers.
pub fn validate_rsa(action: Action, n: &str, e: &str, d: Option<&str>) -> Result<RsaKey> {
    let modulus = parse_positive("n", n)?;
    let public_exponent = parse_positive("e", e)?;

    let d = d.filter(|d| !d.trim().is_empty());
    let private_exponent = match (action, d) {
        (Action::Decrypt, None) => return Err(ValidationError::MissingField("d")),
        (_, Some(d)) => Some(parse_positive("d", d)?),
        (Action::Encrypt, None) => None,
    };

    Ok(RsaKey {
        modulus,
        public_exponent,
        private_exponent,
    })
}

/// Encryption needs the recipient's public point, decryption the private scalar.
pub fn validate_ecies(
    action: Action,
    public: Option<&str>,
    private: Option<&str>,
) -> Result<ValidatedKey> {
    match action {
        Action::Encrypt => {
            let public = public
                .filter(|p| !p.trim().is_empty())
                .ok_or(ValidationError::MissingField("public key"))?;
            Ok(ValidatedKey::EciesPublic(public.parse()?))
        }
        Action::Decrypt => {
            let private = private
                .filter(|p| !p.trim().is_empty())
                .ok_or(ValidationError::MissingField("private key"))?;
            Ok(ValidatedKey::EciesPrivate(parse_unsigned("private key", private)?))
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_empty_text() {
        assert_eq!(validate_text(""), Err(ValidationError::EmptyText));
        assert_eq!(validate_text(" "), Ok(()));
    }

    #[test]
    fn test_block_key_rules() {
        let aes = |k: &str| validate_key(Algorithm::Aes, Action::Encrypt, &KeyMaterial::secret(k));

        assert_eq!(aes(""), Err(ValidationError::MissingKey));
        assert_eq!(
            aes("short"),
            Err(ValidationError::KeyLength { expected: 16, actual: 5 })
        );
        assert_eq!(
            aes("0123456789ABCDEF!"),
            Err(ValidationError::KeyLength { expected: 16, actual: 17 })
        );
        assert_eq!(
            aes("0123456789ABCDEF"),
            Ok(ValidatedKey::Block("0123456789ABCDEF".to_string()))
        );

        // Byte length, not character count.
        assert_eq!(
            validate_block_key("ключ1234", 8),
            Err(ValidationError::KeyLength { expected: 8, actual: 12 })
        );
    }

    #[test]
    fn test_keyword_rules() {
        assert_eq!(validate_keyword(""), Err(ValidationError::MissingKey));
        assert_eq!(validate_keyword("LEMON"), Ok(()));
        assert_eq!(validate_keyword("lemon"), Ok(()));
        assert_eq!(validate_keyword("LEM ON"), Err(ValidationError::NonAlphabeticKeyword));
        assert_eq!(validate_keyword("LEMON1"), Err(ValidationError::NonAlphabeticKeyword));
        assert_eq!(validate_keyword("CAFÉ"), Err(ValidationError::NonAlphabeticKeyword));
    }

    #[test]
    fn test_rail_count_rules() {
        assert_eq!(validate_rail_count("3"), Ok(3));
        assert_eq!(validate_rail_count(" 12 "), Ok(12));
        assert_eq!(validate_rail_count(""), Err(ValidationError::MissingKey));
        assert_eq!(validate_rail_count("three"), Err(ValidationError::RailCountNotNumeric));
        assert_eq!(validate_rail_count("3abc"), Err(ValidationError::RailCountNotNumeric));
        assert_eq!(validate_rail_count("-3"), Err(ValidationError::RailCountNotNumeric));
        assert_eq!(validate_rail_count("1"), Err(ValidationError::RailCountTooSmall(1)));
        assert_eq!(validate_rail_count("0"), Err(ValidationError::RailCountTooSmall(0)));
    }

    #[test]
    fn test_exchange_family_has_no_cipher_key() {
        let ecies_like = KeyMaterial::ecies_public("(4, 991)");
        assert!(validate_key(Algorithm::Ecies, Action::Encrypt, &ecies_like).is_ok());
        assert_eq!(
            validate_key(Algorithm::Ecdh, Action::Encrypt, &ecies_like),
            Err(ValidationError::KeyShapeMismatch(Algorithm::Ecdh))
        );
        assert_eq!(
            validate_key(Algorithm::DiffieHellman, Action::Decrypt, &KeyMaterial::secret("5")),
            Err(ValidationError::KeyShapeMismatch(Algorithm::DiffieHellman))
        );
    }

    #[test]
    fn test_rail_count_upper_bound() {
        let max = Config::global().max_rails();
        assert_eq!(validate_rail_count(&max.to_string()), Ok(max));
        assert_eq!(
            validate_rail_count(&(max + 1).to_string()),
            Err(ValidationError::RailCountTooLarge { max })
        );
        assert_eq!(
            validate_rail_count("1000000000"),
            Err(ValidationError::RailCountTooLarge { max })
        );
        // Does not fit in usize.
        assert_eq!(
            validate_rail_count("99999999999999999999"),
            Err(ValidationError::RailCountTooLarge { max })
        );
    }

    #[test]
    fn test_rsa_rules() {
        let ok = validate_rsa(Action::Encrypt, "3233", "17", None).unwrap();
        assert_eq!(ok.private_exponent, None);

        assert_eq!(
            validate_rsa(Action::Decrypt, "3233", "17", None),
            Err(ValidationError::MissingField("d"))
        );
        assert_eq!(
            validate_rsa(Action::Decrypt, "3233", "17", Some("  ")),
            Err(ValidationError::MissingField("d"))
        );
        assert_eq!(
            validate_rsa(Action::Encrypt, "", "17", None),
            Err(ValidationError::MissingField("n"))
        );
        assert_eq!(
            validate_rsa(Action::Encrypt, "3233", "-17", None),
            Err(ValidationError::MalformedInteger("e"))
        );
        assert_eq!(
            validate_rsa(Action::Encrypt, "3233", "0", None),
            Err(ValidationError::NonPositiveInteger("e"))
        );
        assert_eq!(
            validate_rsa(Action::Encrypt, "3233", "17", Some("abc")),
            Err(ValidationError::MalformedInteger("d"))
        );

        let full = validate_rsa(Action::Decrypt, "3233", "17", Some("2753")).unwrap();
        assert_eq!(full.private_exponent, Some(BigUint::from(2753u32)));
    }

    #[test]
    fn test_ecies_rules() {
        assert_eq!(
            validate_ecies(Action::Encrypt, None, Some("5")),
            Err(ValidationError::MissingField("public key"))
        );
        assert_eq!(
            validate_ecies(Action::Encrypt, Some("(1, two)"), None),
            Err(ValidationError::MalformedPoint)
        );
        assert_eq!(
            validate_ecies(Action::Decrypt, Some("(1, 2)"), None),
            Err(ValidationError::MissingField("private key"))
        );
        assert_eq!(
            validate_ecies(Action::Decrypt, None, Some("x")),
            Err(ValidationError::MalformedInteger("private key"))
        );
        assert!(matches!(
            validate_ecies(Action::Encrypt, Some("(1, 2)"), None),
            Ok(ValidatedKey::EciesPublic(_))
        ));
    }

    #[test]
    fn test_shape_mismatch() {
        assert_eq!(
            validate_key(Algorithm::Rsa, Action::Encrypt, &KeyMaterial::secret("k")),
            Err(ValidationError::KeyShapeMismatch(Algorithm::Rsa))
        );
        assert_eq!(
            validate_key(Algorithm::Aes, Action::Encrypt, &KeyMaterial::ecies_private("1")),
            Err(ValidationError::KeyShapeMismatch(Algorithm::Aes))
        );
        assert_eq!(
            validate_key(Algorithm::Ecdh, Action::Encrypt, &KeyMaterial::ecies_public("(1, 2)")),
            Err(ValidationError::KeyShapeMismatch(Algorithm::Ecdh))
        );
    }
}
