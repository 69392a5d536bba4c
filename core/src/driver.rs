//! Top-level pass driver (spec §4.G): recognizes, then lowers, every
//! contract in a source unit.

use oraclex_ast::{Arena, Node, NodeId};

use crate::config::PassConfig;
use crate::diagnostics::Diagnostics;
use crate::recognize::recognize_contract;
use crate::synth::{callback, container, environment};
use crate::PassResult;

/// Runs the oraclex lowering pass over one source unit.
pub struct Driver {
    config: PassConfig,
}

impl Driver {
    pub fn new(config: PassConfig) -> Self {
        Self { config }
    }

    pub fn config(&self) -> &PassConfig {
        &self.config
    }

    /// Recognizes, then rewrites, every non-ignored contract in
    /// `source_unit`, one contract at a time. Contracts with no recognized
    /// queries are left untouched — no event, struct, state var, or
    /// `__callback` is added. A `RecognitionError` aborts processing of the
    /// contract that triggered it and every contract after it, but every
    /// contract already rewritten in this loop keeps its mutations: nothing
    /// is batched ahead of time.
    pub fn run(&self, arena: &mut Arena, source_unit: NodeId) -> PassResult<()> {
        let mut diagnostics = Diagnostics::new();

        let contracts: Vec<NodeId> = match arena.get(source_unit) {
            Node::SourceUnit(unit) => unit.contracts.clone(),
            _ => Vec::new(),
        };

        for contract in contracts {
            let ignored = match arena.get(contract) {
                Node::Contract(c) => PassConfig::is_ignored(&c.name),
                _ => continue,
            };
            if ignored {
                continue;
            }

            let mut queries = recognize_contract(arena, contract)?;

            if queries.is_empty() {
                diagnostics
                    .info("no oracleQuery calls recognized in this contract")
                    .at(contract)
                    .emit();
                continue;
            }

            environment::synthesize(arena, &self.config, contract, &mut queries);
            for query in &queries {
                container::rewrite(arena, &self.config, query);
            }
            let callback_fn = callback::synthesize(arena, &self.config, &queries);

            if let Node::Contract(c) = arena.get_mut(contract) {
                c.subnodes.push(callback_fn);
            }

            diagnostics
                .info(format!("lowered {} oracleQuery call(s)", queries.len()))
                .at(contract)
                .emit();
        }

        Ok(((), diagnostics))
    }
}
