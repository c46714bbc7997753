//! HTML head rewriting subsystem.
//!
//! # Data Flow
//! ```text
//! request path
//!     → fetcher.rs (metadata fragment, or fallback)       ┐ concurrent
//!     → bundle document read from disk                    ┘
//!     → redirect.rs (alternate-link hint → optional script)
//!     → injector.rs (stripper.rs removes defaults, insert before </head>)
//!     → final document
//! ```
//!
//! # Design Decisions
//! - Text substitution over a targeted tag scanner (markup.rs), no DOM
//! - Nothing is cached; every request fetches and reads afresh
//! - The fetched fragment is trusted markup and inserted verbatim

pub mod fetcher;
pub mod injector;
pub mod markup;
pub mod path;
pub mod pipeline;
pub mod redirect;
pub mod stripper;

pub use fetcher::{FallbackReason, FetchOutcome, MetadataFetcher};
pub use injector::HeadInjector;
pub use path::RequestPath;
pub use pipeline::{PageError, SeoPipeline};
pub use redirect::RedirectDirective;
pub use stripper::DefaultTagStripper;
