//! Error types for graph edits and document uploads.

/// Why an interactive edit was rejected. A rejected edit is never partially
/// applied.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum GraphEditError {
	/// The edit referenced a node that is not in the graph.
	#[error("unknown node `{0}`")]
	UnknownNode(String),

	/// A node with this id already exists.
	#[error("node `{0}` already exists")]
	DuplicateNode(String),

	/// The two nodes are already connected in this direction.
	#[error("`{from}` is already connected to `{to}`")]
	DuplicateEdge {
		/// Source node id.
		from: String,
		/// Target node id.
		to: String,
	},

	/// A node cannot be connected to itself.
	#[error("cannot connect `{0}` to itself")]
	SelfLoop(String),
}

/// Upload failures, either from validation or from the transport.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum UploadError {
	/// Extension is not in the allowed list.
	#[error("Please select a valid file type (PDF, TXT, DOC, DOCX), got `{0}`")]
	UnsupportedType(String),

	/// File exceeds the size limit.
	#[error("File size must be less than {} MB ({} bytes given)", .limit / (1024 * 1024), .size)]
	TooLarge {
		/// Size of the rejected file in bytes.
		size: u64,
		/// Configured limit in bytes.
		limit: u64,
	},

	/// The server answered with a non-success status.
	#[error("server responded with status {0}")]
	Status(u16),

	/// The request never completed.
	#[error("network error: {0}")]
	Network(String),

	/// A browser API refused to build the request.
	#[error("browser error: {0}")]
	Browser(String),
}
