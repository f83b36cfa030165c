//! Poster loading and the poster widget's display state.
//!
//! Loads run on the blocking pool and report back through a channel the UI
//! loop drains, tagged with a generation number so a completion for a poster
//! that has since been replaced is ignored.

use std::path::{Path, PathBuf};

use image::imageops::FilterType;
use ratatui::buffer::Buffer;
use ratatui::layout::Rect;
use ratatui::style::{Color, Style};
use thiserror::Error;
use tokio::sync::mpsc;

/// Poster size in terminal cells. Each cell shows two vertical pixels.
pub const POSTER_COLS: u16 = 20;
pub const POSTER_ROWS: u16 = 15;

#[derive(Debug, Error)]
pub enum PosterError {
    #[error("remote posters are not fetched: {url}")]
    Remote { url: String },

    #[error("failed to read poster '{path}': {source}")]
    Io {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    #[error("failed to decode poster '{path}': {source}")]
    Decode {
        path: PathBuf,
        #[source]
        source: image::ImageError,
    },

    #[error("poster worker failed: {0}")]
    Worker(String),
}

/// Down-sampled poster: `cols * rows` cells, each an (upper, lower) pixel pair.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct PosterArt {
    cols: u16,
    rows: u16,
    cells: Vec<([u8; 3], [u8; 3])>,
}

impl PosterArt {
    pub fn cols(&self) -> u16 {
        self.cols
    }

    pub fn rows(&self) -> u16 {
        self.rows
    }

    /// Paint into `area` with upper-half blocks, clipped to the area.
    pub fn render(&self, area: Rect, buf: &mut Buffer) {
        let cols = self.cols.min(area.width);
        let rows = self.rows.min(area.height);
        for row in 0..rows {
            for col in 0..cols {
                let (top, bottom) = self.cells[(row * self.cols + col) as usize];
                if let Some(cell) = buf.cell_mut((area.x + col, area.y + row)) {
                    cell.set_symbol("▀").set_style(
                        Style::default()
                            .fg(Color::Rgb(top[0], top[1], top[2]))
                            .bg(Color::Rgb(bottom[0], bottom[1], bottom[2])),
                    );
                }
            }
        }
    }
}

/// What the poster region currently shows.
#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub enum PosterView {
    #[default]
    Empty,
    Loading { url: String },
    Ready { url: String, art: PosterArt },
    /// Load finished without art; the frame shows the reason instead.
    Unavailable { url: String, reason: String },
}

impl PosterView {
    pub fn url(&self) -> Option<&str> {
        match self {
            PosterView::Empty => None,
            PosterView::Loading { url }
            | PosterView::Ready { url, .. }
            | PosterView::Unavailable { url, .. } => Some(url),
        }
    }

    pub fn is_loading(&self) -> bool {
        matches!(self, PosterView::Loading { .. })
    }
}

/// Completion of one poster load.
#[derive(Debug)]
pub struct PosterEvent {
    pub generation: u64,
    pub url: String,
    pub result: Result<PosterArt, PosterError>,
}

pub struct PosterLoader {
    events: mpsc::UnboundedSender<PosterEvent>,
}

impl PosterLoader {
    pub fn new() -> (Self, mpsc::UnboundedReceiver<PosterEvent>) {
        let (events, receiver) = mpsc::unbounded_channel();
        (Self { events }, receiver)
    }

    /// Start loading `url` in the background.
    pub fn load(&self, url: String, generation: u64) {
        let events = self.events.clone();
        tokio::spawn(async move {
            let source = url.clone();
            let result = match tokio::task::spawn_blocking(move || {
                decode_poster(&source, POSTER_COLS, POSTER_ROWS)
            })
            .await
            {
                Ok(result) => result,
                Err(err) => Err(PosterError::Worker(err.to_string())),
            };
            let _ = events.send(PosterEvent {
                generation,
                url,
                result,
            });
        });
    }
}

/// Decode a local poster into a `cols` x `rows` cell grid.
pub fn decode_poster(url: &str, cols: u16, rows: u16) -> Result<PosterArt, PosterError> {
    let path = local_path(url)?;
    if !path.exists() {
        return Err(PosterError::Io {
            path,
            source: std::io::Error::from(std::io::ErrorKind::NotFound),
        });
    }

    let image = image::open(&path).map_err(|source| PosterError::Decode {
        path: path.clone(),
        source,
    })?;
    let cols = cols.max(1);
    let rows = rows.max(1);
    let pixels = image
        .resize_exact(cols as u32, rows as u32 * 2, FilterType::Triangle)
        .to_rgb8();

    let mut cells = Vec::with_capacity(cols as usize * rows as usize);
    for row in 0..rows as u32 {
        for col in 0..cols as u32 {
            let top = pixels.get_pixel(col, row * 2).0;
            let bottom = pixels.get_pixel(col, row * 2 + 1).0;
            cells.push((top, bottom));
        }
    }

    Ok(PosterArt { cols, rows, cells })
}

fn local_path(url: &str) -> Result<PathBuf, PosterError> {
    let url = url.trim();
    if url.starts_with("http://") || url.starts_with("https://") {
        return Err(PosterError::Remote {
            url: url.to_string(),
        });
    }
    let path = url.strip_prefix("file://").unwrap_or(url);
    Ok(Path::new(path).to_path_buf())
}

#[cfg(test)]
mod tests {
    use super::*;
    use image::{Rgb, RgbImage};
    use tempfile::TempDir;

    fn write_png(dir: &TempDir) -> PathBuf {
        let path = dir.path().join("poster.png");
        let mut image = RgbImage::new(4, 4);
        for (_, y, pixel) in image.enumerate_pixels_mut() {
            *pixel = if y < 2 { Rgb([255, 0, 0]) } else { Rgb([0, 0, 255]) };
        }
        image.save(&path).unwrap();
        path
    }

    #[test]
    fn remote_urls_are_not_fetched() {
        let err = decode_poster("https://example.com/p.jpg", 4, 4).unwrap_err();
        assert!(matches!(err, PosterError::Remote { .. }));
    }

    #[test]
    fn missing_file_is_io_error() {
        let err = decode_poster("/definitely/not/here.png", 4, 4).unwrap_err();
        assert!(matches!(err, PosterError::Io { .. }));
    }

    #[test]
    fn decodes_local_png_into_cells() {
        let dir = TempDir::new().unwrap();
        let path = write_png(&dir);

        let art = decode_poster(path.to_str().unwrap(), 2, 2).unwrap();
        assert_eq!(art.cols(), 2);
        assert_eq!(art.rows(), 2);
        // Top row is red, bottom row is blue.
        let (top, _) = art.cells[0];
        let (_, bottom) = art.cells[3];
        assert!(top[0] > 200 && top[2] < 50);
        assert!(bottom[2] > 200 && bottom[0] < 50);
    }

    #[test]
    fn file_scheme_is_accepted() {
        let dir = TempDir::new().unwrap();
        let path = write_png(&dir);
        let url = format!("file://{}", path.display());
        assert!(decode_poster(&url, 2, 2).is_ok());
    }

    #[test]
    fn render_clips_to_area() {
        let art = PosterArt {
            cols: 2,
            rows: 2,
            cells: vec![([1, 2, 3], [4, 5, 6]); 4],
        };
        let area = Rect::new(0, 0, 1, 1);
        let mut buf = Buffer::empty(area);
        art.render(area, &mut buf);
        assert_eq!(buf[(0, 0)].symbol(), "▀");
    }

    #[test]
    fn view_url() {
        assert_eq!(PosterView::Empty.url(), None);
        let loading = PosterView::Loading {
            url: "a.png".to_string(),
        };
        assert_eq!(loading.url(), Some("a.png"));
        assert!(loading.is_loading());
    }
}
