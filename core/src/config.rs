//! Compile-time constants and toggles threaded through the pass.

/// Names of support contracts the recognition pass never descends into.
pub const IGNORE_LIST: &[&str] = &[
    "OraclizeI",
    "OraclizeAddrResolverI",
    "usingOraclize",
    "strings",
    "OraclizeSolidity",
];

/// Indentation width used when rendering a [`crate::Query`] for diagnostics.
pub const DEFAULT_INDENT_WIDTH: usize = 4;

/// Configuration for one run of the lowering pass.
///
/// Replaces the `COMPILER_DEBUG`/`AST_DEBUG`/`CONTRACT_DEBUG`/`UINT_256`
/// preprocessor toggles of the original implementation with plain fields set
/// before the pass runs.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct PassConfig {
    pub(crate) gas_limit: u64,
    pub(crate) gas_price: u64,
    pub(crate) threesum_uint_x: u16,
    pub(crate) kp_uint_x: u16,
    pub(crate) kds_uint_x: u16,
    pub(crate) contract_debug: bool,
}

impl Default for PassConfig {
    fn default() -> Self {
        Self {
            gas_limit: 0,
            gas_price: 0,
            threesum_uint_x: 16,
            kp_uint_x: 16,
            kds_uint_x: 8,
            contract_debug: false,
        }
    }
}

impl PassConfig {
    pub fn new() -> Self {
        Self::default()
    }

    /// Gas limit passed to `oraclize_query`. Zero suppresses the argument.
    pub fn with_gas_limit(mut self, gas_limit: u64) -> Self {
        self.gas_limit = gas_limit;
        self
    }

    /// Gas price passed to `oraclize_setCustomGasPrice`. Zero suppresses the call.
    pub fn with_gas_price(mut self, gas_price: u64) -> Self {
        self.gas_price = gas_price;
        self
    }

    pub fn with_threesum_uint_x(mut self, bits: u16) -> Self {
        self.threesum_uint_x = bits;
        self
    }

    pub fn with_kp_uint_x(mut self, bits: u16) -> Self {
        self.kp_uint_x = bits;
        self
    }

    pub fn with_kds_uint_x(mut self, bits: u16) -> Self {
        self.kds_uint_x = bits;
        self
    }

    /// Enable the debug `OraclizeEvent` emissions in the container rewriter
    /// and the `__callback` entry banner.
    pub fn with_contract_debug(mut self, enabled: bool) -> Self {
        self.contract_debug = enabled;
        self
    }

    pub fn gas_limit(&self) -> u64 {
        self.gas_limit
    }

    pub fn gas_price(&self) -> u64 {
        self.gas_price
    }

    pub fn threesum_uint_x(&self) -> u16 {
        self.threesum_uint_x
    }

    pub fn kp_uint_x(&self) -> u16 {
        self.kp_uint_x
    }

    pub fn kds_uint_x(&self) -> u16 {
        self.kds_uint_x
    }

    pub fn contract_debug(&self) -> bool {
        self.contract_debug
    }

    pub fn is_ignored(name: &str) -> bool {
        IGNORE_LIST.contains(&name)
    }
}
