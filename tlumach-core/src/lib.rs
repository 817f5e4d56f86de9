//! Boundary-aware segmentation and reassembly for chunked translation
//!
//! This crate holds the synchronous text side of the relay pipeline:
//!
//! - [`splitter`] packs text into bounded chunks, cutting at paragraph, then
//!   sentence, then word boundaries;
//! - [`context`] derives a bounded trailing excerpt of a finished chunk;
//! - [`sequencer`] combines both into the chunk list handed to translation;
//! - [`reassembler`] joins translated pieces, restoring paragraph breaks;
//! - [`output`] re-splits the assembled text for a delivery channel.
//!
//! Sizes are counted in chars throughout. Chunks are trimmed slices of the
//! source and only whitespace lies between them, so nothing is lost.
//!
//! # Example
//!
//! ```rust
//! use tlumach_core::{reassemble, sequence, split_for_delivery};
//!
//! let text = "First paragraph. It has two sentences.\n\nSecond paragraph.";
//! let chunks = sequence(text, 40, 25);
//! assert_eq!(chunks.len(), 2);
//! assert!(chunks[0].leading_context.is_none());
//! assert_eq!(
//!     chunks[1].leading_context.as_deref(),
//!     Some("It has two sentences.")
//! );
//!
//! // Identity translation gives the source back
//! assert_eq!(reassemble(&chunks), text);
//!
//! let units = split_for_delivery(text, 4000);
//! assert_eq!(units.len(), 1);
//! assert!(units[0].reply_to_origin);
//! ```

pub mod context;
pub mod error;
pub mod limits;
pub mod output;
pub mod reassembler;
pub mod segment;
pub mod sequencer;
pub mod splitter;
pub mod types;

pub use context::extract_context;
pub use error::{CoreError, Result};
pub use limits::Limits;
pub use output::{split_for_delivery, DeliveryUnit, OutputSplitter};
pub use reassembler::{paragraph_crossings, reassemble, Reassemble};
pub use sequencer::{sequence, SequencedChunk, Sequencer};
pub use splitter::{split, Splitter};
pub use types::{BoundaryKind, Chunk, OversizedToken};
