//! Централизованная конфигурация для cipherbench
//!
//! Toy-sized numeric parameters used by the key-exchange simulator and the
//! reference providers live here instead of being hardcoded at call sites.

use std::ops::Range;
use std::sync::OnceLock;

/// Глобальная конфигурация приложения (синглтон)
static GLOBAL_CONFIG: OnceLock<Config> = OnceLock::new();

/// Основная структура конфигурации
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Config {
    // ============================================
    // DIFFIE-HELLMAN
    // ============================================

    /// Нижняя граница (включительно) для приватного скаляра DH
    pub dh_private_min: u64,

    /// Верхняя граница (исключительно) для приватного скаляра DH
    pub dh_private_max: u64,

    /// Простое число p по умолчанию
    pub dh_default_prime: u64,

    /// Генератор g по умолчанию
    pub dh_default_generator: u64,

    // ============================================
    // REFERENCE PROVIDERS
    // ============================================

    /// Диапазон [min, max) для простых чисел RSA
    pub rsa_prime_min: u64,
    pub rsa_prime_max: u64,

    /// Диапазон [min, max) для приватных скаляров на кривой
    pub curve_private_min: u64,
    pub curve_private_max: u64,

    // ============================================
    // RAIL FENCE
    // ============================================

    /// Максимальное число рельсов для Rail Fence и визуализатора
    pub rail_count_max: u64,
}

impl Config {
    /// Создать конфигурацию с дефолтными значениями
    pub fn default() -> Self {
        Self {
            // Diffie-Hellman
            dh_private_min: 50,
            dh_private_max: 250,
            dh_default_prime: 23,
            dh_default_generator: 5,

            // Reference providers
            rsa_prime_min: 50,
            rsa_prime_max: 150,
            curve_private_min: 50,
            curve_private_max: 250,

            // Rail Fence
            rail_count_max: 1000,
        }
    }

    /// Создать конфигурацию из переменных окружения
    ///
    /// Unparsable values are ignored and the default is kept.
    pub fn from_env() -> Self {
        let mut config = Self::default();

        // Переопределяем значения из env, если они заданы
        override_from_env("CIPHERBENCH_DH_PRIVATE_MIN", &mut config.dh_private_min);
        override_from_env("CIPHERBENCH_DH_PRIVATE_MAX", &mut config.dh_private_max);
        override_from_env("CIPHERBENCH_DH_PRIME", &mut config.dh_default_prime);
        override_from_env("CIPHERBENCH_DH_GENERATOR", &mut config.dh_default_generator);
        override_from_env("CIPHERBENCH_RSA_PRIME_MIN", &mut config.rsa_prime_min);
        override_from_env("CIPHERBENCH_RSA_PRIME_MAX", &mut config.rsa_prime_max);
        override_from_env("CIPHERBENCH_RAIL_COUNT_MAX", &mut config.rail_count_max);

        config
    }

    /// Range DH private scalars are drawn from. Never empty.
    pub fn dh_private_range(&self) -> Range<u64> {
        non_empty(self.dh_private_min, self.dh_private_max)
    }

    pub fn rsa_prime_range(&self) -> Range<u64> {
        non_empty(self.rsa_prime_min, self.rsa_prime_max)
    }

    pub fn curve_private_range(&self) -> Range<u64> {
        non_empty(self.curve_private_min, self.curve_private_max)
    }

    /// Largest accepted rail count, never below 2.
    pub fn max_rails(&self) -> usize {
        usize::try_from(self.rail_count_max).unwrap_or(usize::MAX).max(2)
    }

    /// Получить глобальный экземпляр конфигурации
    ///
    /// Автоматически инициализирует конфигурацию со значениями по умолчанию при первом вызове
    pub fn global() -> &'static Config {
        GLOBAL_CONFIG.get_or_init(Config::default)
    }

    /// Инициализировать глобальную конфигурацию из переменных окружения
    ///
    /// # Errors
    ///
    /// Возвращает ошибку, если конфигурация уже была инициализирована
    pub fn init_from_env() -> Result<(), &'static str> {
        GLOBAL_CONFIG
            .set(Self::from_env())
            .map_err(|_| "Config already initialized")
    }
}

fn override_from_env(var: &str, field: &mut u64) {
    if let Ok(val) = std::env::var(var) {
        if let Ok(parsed) = val.trim().parse() {
            *field = parsed;
        }
    }
}

fn non_empty(min: u64, max: u64) -> Range<u64> {
    if min == u64::MAX {
        return (u64::MAX - 1)..u64::MAX;
    }
    min..max.max(min + 1)
}
