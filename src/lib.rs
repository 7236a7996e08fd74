//! # librarium
//!
//! Paginated books for game hosts: a catalog of titled books, a reading
//! session that pages through one of them, and a text flow engine that
//! word-wraps page text containing inline escape codes.
//!
//! ## Quick Start
//!
//! ```
//! use librarium::{Book, Catalog, Librarium};
//!
//! let catalog = Catalog::new(vec![
//!     Book::new("Lilia").with_page("A short tale ").with_page("of wrapping."),
//! ]);
//! let mut library = Librarium::new(catalog);
//!
//! library.open_reading("lilia").unwrap();
//! assert_eq!(library.current_page_number().unwrap(), 1);
//! library.next_page().unwrap();
//! assert_eq!(library.current_page_text().unwrap(), "of wrapping.");
//!
//! // Ten pixels per character, 80 pixels per line.
//! let measure = |text: &str| text.chars().count() as f32 * 10.0;
//! let layout = library.get_current_page_layout(&measure, 80.0, 200.0).unwrap();
//! assert_eq!(layout.line_count(), 2);
//! ```
//!
//! ## Escape codes
//!
//! Page text may use `\C[n]` (color), `\I[n]` (icon), `\{` / `\}` (font
//! size), `\V[n]`, `\N[n]`, `\P[n]`, `\G` (host values) and `\\`. See
//! [`layout::StandardEscapes`].

pub mod book;
pub mod config;
pub mod error;
pub mod layout;
pub mod library;
pub mod session;
pub mod view;

#[cfg(feature = "wasm")]
pub mod wasm;

pub use book::{Book, Catalog, Page};
pub use config::{FlowSettings, LibrariumConfig};
pub use error::{Error, Result};
pub use layout::{
    FlowArea, LayoutToken, MonospaceMeasure, Point, TextFlowEngine, TextLayout, TextMeasure,
    TextStyle, TokenKind,
};
pub use library::Librarium;
pub use session::ReadingSession;
pub use view::{BookScene, LayoutPreset, NavigationEvent, Rect, RecordingSurface, SceneControl};
