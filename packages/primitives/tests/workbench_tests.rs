//! End-to-end tests: dispatcher, registry and codecs over the builtin providers.

use cipherbench_core::codec::RsaKeys;
use cipherbench_core::crypto::provider::{BlockPrimitive, Direction, RsaPrimitive};
use cipherbench_core::utils::b64;
use cipherbench_core::{
    Action, Algorithm, CoreError, DhParams, DiffieHellman, Dispatcher, Ecdh, GeneratedKeys,
    KeyExchangeSession, KeyMaterial, PartyState, Role,
};
use cipherbench_primitives::block::Aes128Ecb;
use cipherbench_primitives::builtin_dispatcher;
use cipherbench_primitives::rsa::TextbookRsa;
use num_bigint::BigUint;

const AES_KEY: &str = "0123456789ABCDEF";
const DES_KEY: &str = "8bytekey";

async fn roundtrip(dispatcher: &Dispatcher, algorithm: Algorithm, text: &str, key: &KeyMaterial) -> String {
    let ciphertext = dispatcher
        .execute(algorithm, Action::Encrypt, text, key)
        .await
        .unwrap();
    dispatcher
        .execute(algorithm, Action::Decrypt, &ciphertext, key)
        .await
        .unwrap()
}

async fn rsa_keys(dispatcher: &Dispatcher) -> RsaKeys {
    match dispatcher.generate_keys(Algorithm::Rsa).await.unwrap() {
        GeneratedKeys::Rsa(keys) => keys,
        other => panic!("unexpected keys: {other:?}"),
    }
}

#[tokio::test]
async fn test_hello_aes_single_block() {
    let dispatcher = builtin_dispatcher();
    let key = KeyMaterial::secret(AES_KEY);

    let ciphertext = dispatcher
        .execute(Algorithm::Aes, Action::Encrypt, "HELLO", &key)
        .await
        .unwrap();
    assert_eq!(b64::decode(&ciphertext).unwrap().len(), 16);

    let plaintext = dispatcher
        .execute(Algorithm::Aes, Action::Decrypt, &ciphertext, &key)
        .await
        .unwrap();
    assert_eq!(plaintext, "HELLO");
}

#[tokio::test]
async fn test_aes_codec_matches_raw_primitive() {
    let dispatcher = builtin_dispatcher();
    let text = "sixteen byte msg";

    let ciphertext = dispatcher
        .execute(Algorithm::Aes, Action::Encrypt, text, &KeyMaterial::secret(AES_KEY))
        .await
        .unwrap();
    let bytes = b64::decode(&ciphertext).unwrap();
    assert_eq!(bytes.len(), 32);

    let mut expected = [0u8; 16];
    assert!(Aes128Ecb::new().process(text.as_bytes(), AES_KEY.as_bytes(), &mut expected, true));
    assert_eq!(&bytes[..16], &expected);
}

#[tokio::test]
async fn test_block_and_classical_roundtrips() {
    let dispatcher = builtin_dispatcher();
    let texts = ["A", "Attack at dawn!", "Привет, мир", "line\nbreaks\tand tabs"];

    for text in texts {
        assert_eq!(roundtrip(&dispatcher, Algorithm::Aes, text, &KeyMaterial::secret(AES_KEY)).await, text);
        assert_eq!(roundtrip(&dispatcher, Algorithm::Des, text, &KeyMaterial::secret(DES_KEY)).await, text);
        assert_eq!(roundtrip(&dispatcher, Algorithm::Vigenere, text, &KeyMaterial::secret("LEMON")).await, text);
        for rails in ["2", "3", "7"] {
            assert_eq!(
                roundtrip(&dispatcher, Algorithm::RailFence, text, &KeyMaterial::secret(rails)).await,
                text
            );
        }
    }
}

#[tokio::test]
async fn test_playfair_roundtrip_on_prepared_text() {
    let dispatcher = builtin_dispatcher();
    let key = KeyMaterial::secret("PLAYFAIREXAMPLE");

    // Playfair normalizes its input, so round-trips hold for already prepared text.
    let out = roundtrip(&dispatcher, Algorithm::Playfair, "HIDETHEGOLDINTHETREXESTUMP", &key).await;
    assert_eq!(out, "HIDETHEGOLDINTHETREXESTUMP");

    let ciphertext = dispatcher
        .execute(Algorithm::Playfair, Action::Encrypt, "Hide the gold in the tree stump", &key)
        .await
        .unwrap();
    assert_eq!(ciphertext, "BMODZBXDNABEKUDMUIXMMOUVIF");
}

#[tokio::test]
async fn test_rsa_roundtrip_with_generated_keys() {
    let dispatcher = builtin_dispatcher();
    let keys = rsa_keys(&dispatcher).await;
    let material = KeyMaterial::rsa(
        keys.modulus.to_string(),
        keys.public_exponent.to_string(),
        Some(keys.private_exponent.to_string()),
    );

    for text in ["HELLO", "Mixed case, digits 123 and ünïcödé"] {
        assert_eq!(roundtrip(&dispatcher, Algorithm::Rsa, text, &material).await, text);
    }
    assert!(keys.public_key().starts_with('('));
}

#[tokio::test]
async fn test_rsa_direction_misuse_never_silently_succeeds() {
    let dispatcher = builtin_dispatcher();
    let keys = rsa_keys(&dispatcher).await;
    let text = "HELLO";

    let ciphertext = TextbookRsa
        .process(text, &keys.modulus, &keys.public_exponent, Direction::Encrypt)
        .unwrap();

    // Decrypting with the public exponent instead of the private one.
    match TextbookRsa.process(&ciphertext, &keys.modulus, &keys.public_exponent, Direction::Decrypt) {
        Ok(out) => assert_ne!(out, text),
        Err(_) => {}
    }

    // Running the encrypt direction on ciphertext yields numbers, not the plaintext.
    let again = TextbookRsa
        .process(&ciphertext, &keys.modulus, &keys.private_exponent, Direction::Encrypt)
        .unwrap();
    assert_ne!(again, text);
}

#[tokio::test]
async fn test_rsa_decrypt_requires_d() {
    let dispatcher = builtin_dispatcher();
    let err = dispatcher
        .execute(
            Algorithm::Rsa,
            Action::Decrypt,
            "1,2,3",
            &KeyMaterial::rsa("3233", "17", None),
        )
        .await
        .unwrap_err();
    assert!(err.is_validation());
}

#[tokio::test]
async fn test_ecies_roundtrip_with_generated_keys() {
    let dispatcher = builtin_dispatcher();
    let pair = match dispatcher.generate_keys(Algorithm::Ecies).await.unwrap() {
        GeneratedKeys::Curve(pair) => pair,
        other => panic!("unexpected keys: {other:?}"),
    };

    let public = KeyMaterial::ecies_public(pair.public.to_string());
    let private = KeyMaterial::ecies_private(pair.private.to_string());

    let ciphertext = dispatcher
        .execute(Algorithm::Ecies, Action::Encrypt, "Meet at noon", &public)
        .await
        .unwrap();
    let plaintext = dispatcher
        .execute(Algorithm::Ecies, Action::Decrypt, &ciphertext, &private)
        .await
        .unwrap();
    assert_eq!(plaintext, "Meet at noon");
}

#[tokio::test]
async fn test_malformed_ciphertext() {
    let dispatcher = builtin_dispatcher();

    for bad in ["not base64!", "AAAA"] {
        let err = dispatcher
            .execute(Algorithm::Aes, Action::Decrypt, bad, &KeyMaterial::secret(AES_KEY))
            .await
            .unwrap_err();
        assert!(matches!(err, CoreError::MalformedCiphertext(_)), "{bad}: {err:?}");
    }
}

#[tokio::test]
async fn test_visualizer_agrees_with_rail_fence() {
    let dispatcher = builtin_dispatcher();
    let text = "WEAREDISCOVEREDFLEEATONCE";

    let grid = dispatcher.visualize(text, "3").unwrap();
    assert_eq!(grid.rails(), 3);
    assert_eq!(grid.columns(), 25);
    let first_row: Vec<usize> = (0..25).filter(|&c| grid.cell(0, c).is_some()).collect();
    assert_eq!(first_row, (0..25).step_by(4).collect::<Vec<_>>());

    for rails in 2..9 {
        let rails = rails.to_string();
        let grid = dispatcher.visualize(text, &rails).unwrap();
        let ciphertext = dispatcher
            .execute(Algorithm::RailFence, Action::Encrypt, text, &KeyMaterial::secret(rails.as_str()))
            .await
            .unwrap();
        assert_eq!(grid.read_rows(), ciphertext);
    }
}

#[tokio::test]
async fn test_diffie_hellman_agreement() {
    let dispatcher = builtin_dispatcher();

    for (prime, generator) in [("23", "5"), ("7919", "7"), ("2147483647", "16807")] {
        let params = DhParams::parse(prime, generator).unwrap();
        let mut session = KeyExchangeSession::new(DiffieHellman::new(params));

        session.generate(&dispatcher, Role::A).await.unwrap();
        session.generate(&dispatcher, Role::B).await.unwrap();
        let outcome = session.compute_secrets(&dispatcher).await.unwrap();

        assert!(outcome.agrees(), "p={prime} g={generator}");
        assert!(outcome.secret_a < prime.parse::<BigUint>().unwrap());
    }
}

#[tokio::test]
async fn test_ecdh_agreement() {
    let dispatcher = builtin_dispatcher();

    for _ in 0..5 {
        let mut session = KeyExchangeSession::new(Ecdh);
        session.generate(&dispatcher, Role::A).await.unwrap();
        session.generate(&dispatcher, Role::B).await.unwrap();

        let outcome = session.compute_secrets(&dispatcher).await.unwrap();
        assert!(outcome.agrees());
        assert_eq!(session.state(Role::B), PartyState::SecretComputed);
    }
    assert!(dispatcher.registry().is_loaded("ecc"));
}

#[tokio::test]
async fn test_rail_count_bounds_with_builtin_provider() {
    let dispatcher = builtin_dispatcher();
    let max = cipherbench_core::Config::global().max_rails();

    let key = KeyMaterial::secret(max.to_string());
    assert_eq!(roundtrip(&dispatcher, Algorithm::RailFence, "HELLO", &key).await, "HELLO");
    assert_eq!(dispatcher.visualize("HELLO", &max.to_string()).unwrap().rails(), max);

    let err = dispatcher
        .execute(
            Algorithm::RailFence,
            Action::Encrypt,
            "HELLO",
            &KeyMaterial::secret("99999999999999999999"),
        )
        .await
        .unwrap_err();
    assert!(err.is_validation());
    assert!(dispatcher.visualize("HELLO", "1000000000").is_err());
}
