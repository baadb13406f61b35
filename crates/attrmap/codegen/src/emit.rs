// AttrMap
// Copyright (C) 2025 AttrMap contributors

// This program is free software: you can redistribute it and/or modify
// it under the terms of the GNU Affero General Public License as published by
// the Free Software Foundation, either version 3 of the License, or
// (at your option) any later version.

// This program is distributed in the hope that it will be useful,
// but WITHOUT ANY WARRANTY; without even the implied warranty of
// MERCHANTABILITY or FITNESS FOR A PARTICULAR PURPOSE.  See the
// GNU Affero General Public License for more details.

// You should have received a copy of the GNU Affero General Public License
// along with this program.  If not, see <http://www.gnu.org/licenses/>.

//! Code emitter seam
//!
//! Rendering is an external collaborator. The contract it owes this core is
//! purity: emitted text must be a function of the plan alone, so identical
//! plans render identical output. Identifier uniqueness comes from an
//! [`EmitContext`] passed explicitly, never from global counters.

use crate::strategy::MapperPlan;
use thiserror::Error;

/// Errors an emitter may surface while rendering a plan.
#[derive(Debug, Error)]
pub enum EmitError {
    #[error("rendering failed for mapper `{mapper}`: {details}")]
    Render { mapper: String, details: String },
}

/// Reentrant counter state for generated identifiers. One context per emitted
/// mapper keeps output stable under any emission order.
#[derive(Debug, Default)]
pub struct EmitContext {
    next_temp: u64,
}

impl EmitContext {
    pub fn new() -> Self {
        Self::default()
    }

    /// Next unique identifier with the given prefix.
    pub fn next_ident(&mut self, prefix: &str) -> String {
        let ident = format!("{prefix}_{}", self.next_temp);
        self.next_temp += 1;
        ident
    }
}

/// Consumer of resolved plans: renders the two symmetric conversion routines
/// for each mapper.
pub trait CodeEmitter {
    fn emit_mapper(&mut self, plan: &MapperPlan, ctx: &mut EmitContext) -> Result<String, EmitError>;
}
