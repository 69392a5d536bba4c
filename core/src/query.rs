//! The recognized-query model: [`OracleKind`], [`Query`], and [`QueryPayload`].

use std::sync::LazyLock;

use indexmap::IndexMap;
use oraclex_ast::NodeId;

/// One of the eight oracle computations the pass recognizes.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
#[cfg_attr(feature = "serde", derive(serde::Serialize))]
pub enum OracleKind {
    Data,
    Sort,
    Sqrt,
    Min,
    ThreeSum,
    Kp,
    Apsp,
    Kds,
}

impl OracleKind {
    pub const ALL: [OracleKind; 8] = [
        OracleKind::Data,
        OracleKind::Sort,
        OracleKind::Sqrt,
        OracleKind::Min,
        OracleKind::ThreeSum,
        OracleKind::Kp,
        OracleKind::Apsp,
        OracleKind::Kds,
    ];

    /// The canonical lowercase name used in `oracleQuery("name", ...)` and in
    /// the default service URL.
    pub fn name(self) -> &'static str {
        match self {
            OracleKind::Data => "data",
            OracleKind::Sort => "sort",
            OracleKind::Sqrt => "sqrt",
            OracleKind::Min => "min",
            OracleKind::ThreeSum => "3sum",
            OracleKind::Kp => "kp",
            OracleKind::Apsp => "apsp",
            OracleKind::Kds => "kds",
        }
    }

    /// Look up a kind by name, case-insensitively. `Data` has no default URL.
    pub fn from_name(name: &str) -> Option<OracleKind> {
        NAME_TO_KIND.get(name.to_lowercase().as_str()).copied()
    }

    /// `https://oraclize-solidity.herokuapp.com/<name>/`, absent for `Data`.
    pub fn default_url(self) -> Option<&'static str> {
        KIND_TO_DEFAULT_URL.get(&self).copied()
    }
}

impl std::fmt::Display for OracleKind {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.name())
    }
}

static NAME_TO_KIND: LazyLock<IndexMap<&'static str, OracleKind>> = LazyLock::new(|| {
    OracleKind::ALL.into_iter().map(|k| (k.name(), k)).collect()
});

static KIND_TO_DEFAULT_URL: LazyLock<IndexMap<OracleKind, &'static str>> = LazyLock::new(|| {
    static URLS: LazyLock<IndexMap<OracleKind, String>> = LazyLock::new(|| {
        OracleKind::ALL
            .into_iter()
            .filter(|k| *k != OracleKind::Data)
            .map(|k| {
                (
                    k,
                    format!("https://oraclize-solidity.herokuapp.com/{}/", k.name()),
                )
            })
            .collect()
    });
    URLS.iter().map(|(k, v)| (*k, v.as_str())).collect()
});

/// A recognized invocation failed to satisfy the invariants of its own
/// variant (e.g. a `Data` query with no URLs). Recognition is responsible for
/// never hitting this in practice since it validates shape first; it exists
/// so the model is not trustingly unchecked.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
#[error("{0}")]
pub struct InvalidPayload(pub String);

/// Per-kind fields of a recognized query, distinct from the common fields
/// carried on [`Query`] itself.
#[derive(Debug, Clone, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize))]
pub enum QueryPayload {
    Data {
        urls: Vec<String>,
    },
    Min {
        array: NodeId,
        url: Option<String>,
        switch: Option<NodeId>,
    },
    Sort {
        array: NodeId,
        verify: bool,
        url: Option<String>,
        switch: Option<NodeId>,
    },
    Sqrt {
        number: NodeId,
        verify: bool,
        url: Option<String>,
        switch: Option<NodeId>,
    },
    ThreeSum {
        array: NodeId,
        sum: NodeId,
        verify: bool,
        url: Option<String>,
        switch: Option<NodeId>,
    },
    Kp {
        array: NodeId,
        path_len: NodeId,
        max_weight: NodeId,
        verify: bool,
        url: Option<String>,
        switch: Option<NodeId>,
    },
    Apsp {
        array: NodeId,
        url: Option<String>,
        switch: Option<NodeId>,
    },
    Kds {
        array: NodeId,
        max_size: NodeId,
        verify: bool,
        url: Option<String>,
        switch: Option<NodeId>,
    },
}

impl QueryPayload {
    pub fn data(urls: Vec<String>) -> Result<Self, InvalidPayload> {
        if urls.is_empty() {
            return Err(InvalidPayload(
                "data query requires at least one URL".to_string(),
            ));
        }
        Ok(QueryPayload::Data { urls })
    }

    pub fn kind(&self) -> OracleKind {
        match self {
            QueryPayload::Data { .. } => OracleKind::Data,
            QueryPayload::Min { .. } => OracleKind::Min,
            QueryPayload::Sort { .. } => OracleKind::Sort,
            QueryPayload::Sqrt { .. } => OracleKind::Sqrt,
            QueryPayload::ThreeSum { .. } => OracleKind::ThreeSum,
            QueryPayload::Kp { .. } => OracleKind::Kp,
            QueryPayload::Apsp { .. } => OracleKind::Apsp,
            QueryPayload::Kds { .. } => OracleKind::Kds,
        }
    }

    /// Number of outbound queries this payload dispatches. Only `Data` can
    /// exceed 1.
    pub fn query_size(&self) -> usize {
        match self {
            QueryPayload::Data { urls } => urls.len(),
            _ => 1,
        }
    }

    /// `true` iff `verify` was requested for a kind that actually honors it.
    /// `Data`/`Sort`/`Min`/`Apsp` always report `false` here, even if a
    /// `verify` flag was parsed for `Sort` — that flag is stored but
    /// deliberately inert (see recognition's per-kind payload construction).
    pub fn verifies(&self) -> bool {
        match self {
            QueryPayload::Sqrt { verify, .. }
            | QueryPayload::ThreeSum { verify, .. }
            | QueryPayload::Kp { verify, .. }
            | QueryPayload::Kds { verify, .. } => *verify,
            _ => false,
        }
    }

    /// Override URL, if the author supplied a nonempty one.
    pub fn url_override(&self) -> Option<&str> {
        match self {
            QueryPayload::Data { .. } => None,
            QueryPayload::Min { url, .. }
            | QueryPayload::Sort { url, .. }
            | QueryPayload::Sqrt { url, .. }
            | QueryPayload::ThreeSum { url, .. }
            | QueryPayload::Kp { url, .. }
            | QueryPayload::Apsp { url, .. }
            | QueryPayload::Kds { url, .. } => url.as_deref().filter(|u| !u.is_empty()),
        }
    }

    /// Switch/shortcut identifier. Only meaningful for `Kp`/`Kds`; present
    /// here on every array-accepting variant's parse but only acted on by
    /// the container rewriter for those two kinds.
    pub fn switch(&self) -> Option<NodeId> {
        match self {
            QueryPayload::Data { .. } => None,
            QueryPayload::Min { switch, .. }
            | QueryPayload::Sort { switch, .. }
            | QueryPayload::Sqrt { switch, .. }
            | QueryPayload::ThreeSum { switch, .. }
            | QueryPayload::Kp { switch, .. }
            | QueryPayload::Apsp { switch, .. }
            | QueryPayload::Kds { switch, .. } => *switch,
        }
    }
}

/// One recognized `oracleQuery(...)` invocation.
#[derive(Debug, Clone, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize))]
pub struct Query {
    pub callback: NodeId,
    pub container: NodeId,
    pub env_name: Option<String>,
    pub var_name: Option<String>,
    pub payload: QueryPayload,
    /// The original `oracleQuery(...)` expression statement. An index into
    /// the arena, not an owning handle — used only by the container
    /// rewriter to locate and splice the call site.
    pub(crate) call_stmt: NodeId,
}

impl Query {
    pub fn new(callback: NodeId, container: NodeId, call_stmt: NodeId, payload: QueryPayload) -> Self {
        Self {
            callback,
            container,
            env_name: None,
            var_name: None,
            payload,
            call_stmt,
        }
    }

    pub fn kind(&self) -> OracleKind {
        self.payload.kind()
    }

    pub fn query_size(&self) -> usize {
        self.payload.query_size()
    }

    /// Assigns `env_name = "OEnv<i>"` and `var_name = "_oEnv<i>"` for this
    /// query's position within its contract.
    pub fn assign_names(&mut self, index: usize) {
        self.env_name = Some(format!("OEnv{index}"));
        self.var_name = Some(format!("_oEnv{index}"));
    }
}

impl std::fmt::Display for Query {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.kind())?;
        if let (Some(env), Some(var)) = (&self.env_name, &self.var_name) {
            write!(f, " {env}/{var}")?;
        }
        match &self.payload {
            QueryPayload::Data { urls } => write!(f, " urls={}", urls.len()),
            _ => {
                if self.payload.verifies() {
                    write!(f, " verify")
                } else {
                    Ok(())
                }
            }
        }
    }
}
