//! Chart rendering.
//!
//! Charts are drawn with `plotters` into an in-memory RGB buffer. The UI turns
//! that buffer into a texture and the exporter encodes it as PNG or JPG.

mod chart;
pub mod styles;
#[cfg(test)]
mod tests;

use lru::LruCache;
use once_cell::sync::Lazy;
use plotters::prelude::*;
use std::error::Error;
use std::hash::{Hash, Hasher};
use std::num::NonZeroUsize;
use std::sync::Arc;
use std::time::{Duration, Instant};
use tokio::sync::Mutex as TokioMutex;

pub use chart::draw_chart;

use crate::types::ChartType;
use crate::utils::SeriesView;

pub type PlotError = Box<dyn Error + Send + Sync>;

pub const DEFAULT_SIZE: (u32, u32) = (960, 540);
const CACHE_TTL: Duration = Duration::from_secs(300);

/// Everything needed to draw one chart
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub struct ChartRequest {
    pub chart_type: ChartType,
    pub view: SeriesView,
    pub title: String,
    pub width: u32,
    pub height: u32,
}

impl ChartRequest {
    pub fn new(chart_type: ChartType, view: SeriesView, title: impl Into<String>) -> Self {
        Self {
            chart_type,
            view,
            title: title.into(),
            width: DEFAULT_SIZE.0,
            height: DEFAULT_SIZE.1,
        }
    }

    fn cache_key(&self) -> u64 {
        let mut hasher = std::collections::hash_map::DefaultHasher::new();
        self.hash(&mut hasher);
        hasher.finish()
    }
}

/// A drawn chart as tightly packed RGB8 pixels
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RenderedChart {
    pub pixels: Vec<u8>,
    pub width: u32,
    pub height: u32,
}

impl RenderedChart {
    /// Expand to RGBA for texture upload
    pub fn to_rgba(&self) -> Vec<u8> {
        self.pixels
            .chunks_exact(3)
            .flat_map(|px| [px[0], px[1], px[2], 255])
            .collect()
    }
}

// Recently drawn charts, so flipping between chart types doesn't redraw
static PLOT_CACHE: Lazy<Arc<TokioMutex<LruCache<u64, (RenderedChart, Instant)>>>> = Lazy::new(|| {
    Arc::new(TokioMutex::new(LruCache::new(
        NonZeroUsize::new(16).unwrap_or(NonZeroUsize::MIN),
    )))
});

/// Draw a chart synchronously
pub fn render_chart(request: &ChartRequest) -> Result<RenderedChart, PlotError> {
    let (width, height) = (request.width.max(1), request.height.max(1));
    let mut pixels = vec![0u8; width as usize * height as usize * 3];
    {
        let root = BitMapBackend::with_buffer(&mut pixels, (width, height)).into_drawing_area();
        draw_chart(request, &root)?;
        root.present()?;
    }
    Ok(RenderedChart {
        pixels,
        width,
        height,
    })
}

/// Draw a chart on the blocking pool, reusing a cached copy when one is fresh.
pub async fn render_chart_async(request: ChartRequest) -> Result<RenderedChart, PlotError> {
    let key = request.cache_key();

    if let Some((chart, timestamp)) = PLOT_CACHE.lock().await.get(&key) {
        if timestamp.elapsed() < CACHE_TTL {
            return Ok(chart.clone());
        }
    }

    let chart = tokio::task::spawn_blocking(move || render_chart(&request)).await??;
    PLOT_CACHE.lock().await.put(key, (chart.clone(), Instant::now()));
    Ok(chart)
}
