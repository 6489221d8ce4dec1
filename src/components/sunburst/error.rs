//! Errors raised by the sunburst core.

use thiserror::Error;

use super::types::NodeId;

/// Failures surfaced to the host. Geometry never fails; it clamps.
#[derive(Error, Debug, Clone, PartialEq)]
pub enum SunburstError {
	/// The input tree cannot be laid out. `path` is the slash-joined chain of
	/// node names from the root to the offending node.
	#[error("invalid hierarchy data at '{path}': {reason}")]
	InvalidData {
		/// Node names from the root, joined with `/`.
		path: String,
		/// What is wrong with the node.
		reason: String,
	},

	/// A focus request named a node that does not belong to the hierarchy.
	#[error("focus target {0} is not part of the hierarchy")]
	InvalidTarget(NodeId),
}
