//! # TTML Lyric Text: Flattening Apple Music / AMLL TTML Lyrics into Marked Text
//!
//! This crate parses TTML (Timed Text Markup Language) lyric documents, in the flavour used by
//! Apple Music and AMLL, and flattens them into a line-oriented text format in which every row
//! carries a small bracketed marker describing its role:
//!
//! - `[-]Verse` starts a section (the label may be empty).
//! - `[:-]`, `[-:]` and `[:-:]` mark a lyric line of the lead singer, the other singer of a
//!   duet, or a centered line when the song has no duet at all.
//! - The same markers with `_` instead of `-` mark secondary rows: background vocals (wrapped
//!   in parentheses), the selected translation, and the songwriter credit line.
//!
//! The two primary functions you will use are:
//! - [`parse_ttml`]: Converts a TTML string into a [`TtmlDocument`].
//! - [`ttml_to_text`]: Parses and renders in one call.
//!
//! Only one translation language survives: when a document carries several, the choice
//! follows [`select_translation_language`].
//!
//! ## ⚠️ Important: Not a General-Purpose Parser
//!
//! This library is **not** designed for generic TTML subtitle files. Timing attributes are
//! ignored entirely; only the text structure of the lyrics is kept.
//!
//! ## Examples
//!
//! ```rust
//! use ttml_lyric_text::{TtmlTextOptions, parse_ttml};
//!
//! fn main() -> Result<(), Box<dyn std::error::Error>> {
//!     let ttml_content = r#"
//!     <tt xmlns="http://www.w3.org/ns/ttml"
//!         xmlns:itunes="http://music.apple.com/lyric-ttml-internal">
//!       <body>
//!         <div itunes:song-part="Verse">
//!           <p begin="5.0s" end="10.0s">Hello</p>
//!         </div>
//!       </body>
//!     </tt>
//!     "#;
//!
//!     let document = parse_ttml(ttml_content, &TtmlTextOptions::default())?;
//!     assert_eq!(document.lines().len(), 1);
//!     assert_eq!(document.render(), "[-]Verse\n[:-:]Hello");
//!
//!     Ok(())
//! }
//! ```

pub mod config;
pub mod error;
pub mod language;
pub mod markup;
pub mod model;
pub mod ns;
pub mod parser;
pub mod songwriters;
pub mod time;

pub use config::{DEFAULT_LANGUAGE, TtmlTextOptions, TtmlTextOptionsBuilder};
pub use error::{Result, TtmlTextError};
pub use language::select_translation_language;
pub use markup::{
    Alignment, LineKind, LineMarker, MarkedLine, SECTION_MARKER, is_pure_center,
    parse_marked_text,
};
pub use model::{Part, TtmlDocument, TtmlLine};
pub use ns::{Namespace, qualified_name};
pub use parser::parse_ttml;
pub use songwriters::{SongwriterCredit, join_songwriters};
pub use time::TtmlTime;

/// 解析 TTML 歌词并直接生成带标记的文本。
///
/// # Errors
///
/// 与 [`parse_ttml`] 相同。
pub fn ttml_to_text(content: &str, options: &TtmlTextOptions) -> Result<String> {
    parse_ttml(content, options).map(|document| document.render())
}
