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

//! The analysis pipeline
//!
//! Four cooperating pieces, leaves first: member/property analysis, collection
//! classification, nested-object resolution with cycle detection, and the
//! strategy resolver orchestrating them per mapper declaration.

pub mod collection;
pub mod context;
pub mod member;
pub mod nested;
pub mod resolver;

pub use context::{AnalysisContext, AncestorChain, CancelFlag, Cancelled, StepResult};
pub use member::{AnalyzedMember, analyze_member, validate_override_paths};
pub use nested::resolve_nested;
pub use resolver::{resolve_mapper, resolve_member};
