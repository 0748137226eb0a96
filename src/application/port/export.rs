// SPDX-License-Identifier: MPL-2.0
//! Board export port definitions.
//!
//! The core does not rasterize anything. It describes *what* to capture as a
//! [`CaptureScope`] and hands it to a [`BoardExporter`] implemented by the
//! presentation layer (PNG rasterizer, PDF assembler, ...).

use crate::app::selection::CanvasLayout;
use crate::app::state::MoodboardState;
use crate::domain::board::{Sticker, TimeSegment};
use kurbo::Rect;
use std::fmt;
use std::path::Path;

// =============================================================================
// ExportError
// =============================================================================

/// Errors that can occur while exporting a board.
#[derive(Debug, Clone, PartialEq)]
pub enum ExportError {
    /// The exporter does not produce this format.
    UnsupportedFormat(ExportFormat),

    /// There is nothing to capture.
    EmptyBoard,

    /// Rendering failed.
    RenderFailed(String),

    /// The output could not be written.
    WriteFailed(String),
}

impl fmt::Display for ExportError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            ExportError::UnsupportedFormat(format) => {
                write!(f, "Export format not supported: {format}")
            }
            ExportError::EmptyBoard => write!(f, "Board has no segments to export"),
            ExportError::RenderFailed(msg) => write!(f, "Failed to render board: {msg}"),
            ExportError::WriteFailed(msg) => write!(f, "Failed to write export: {msg}"),
        }
    }
}

impl std::error::Error for ExportError {}

// =============================================================================
// Capture scope
// =============================================================================

/// Output document kind.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ExportFormat {
    Png,
    Pdf,
}

impl ExportFormat {
    /// Conventional file extension.
    #[must_use]
    pub fn extension(self) -> &'static str {
        match self {
            ExportFormat::Png => "png",
            ExportFormat::Pdf => "pdf",
        }
    }
}

impl fmt::Display for ExportFormat {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.extension())
    }
}

/// One segment to capture, with its stickers bottom to top.
#[derive(Debug, Clone, PartialEq)]
pub struct CapturedSegment {
    pub segment: TimeSegment,
    /// Canvas-space bounds.
    pub bounds: Rect,
    pub stickers: Vec<Sticker>,
}

/// Everything an exporter needs to draw the board.
#[derive(Debug, Clone, PartialEq, Default)]
pub struct CaptureScope {
    /// Segments in display order.
    pub segments: Vec<CapturedSegment>,
}

impl CaptureScope {
    /// Collects segments in display order, each with its stickers sorted by
    /// z-index (ties by id). Collapsed segments are captured without stickers.
    pub fn of(state: &MoodboardState, layout: &impl CanvasLayout) -> Self {
        let segments = state
            .segment_order
            .iter()
            .filter_map(|id| {
                let segment = state.segments.get(id)?;
                let bounds = layout.segment_bounds(state, id)?;
                let mut stickers: Vec<Sticker> = if segment.collapsed {
                    Vec::new()
                } else {
                    state.stickers_in(id).cloned().collect()
                };
                stickers.sort_by(|a, b| a.z_index.cmp(&b.z_index).then_with(|| a.id.cmp(&b.id)));
                Some(CapturedSegment {
                    segment: segment.clone(),
                    bounds,
                    stickers,
                })
            })
            .collect();
        Self { segments }
    }

    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.segments.is_empty()
    }

    /// Union of every captured segment's bounds.
    #[must_use]
    pub fn bounds(&self) -> Option<Rect> {
        self.segments
            .iter()
            .map(|captured| captured.bounds)
            .reduce(|acc, bounds| acc.union(bounds))
    }

    /// Number of stickers across all segments.
    #[must_use]
    pub fn sticker_count(&self) -> usize {
        self.segments.iter().map(|s| s.stickers.len()).sum()
    }
}

/// Renders a captured board to a file.
pub trait BoardExporter: Send + Sync {
    /// Formats this exporter can write.
    fn formats(&self) -> &[ExportFormat];

    /// Writes `scope` to `destination` in `format`.
    fn export(
        &self,
        scope: &CaptureScope,
        format: ExportFormat,
        destination: &Path,
    ) -> Result<(), ExportError>;
}

/// Captures `state` and runs `exporter`, checking the format and rejecting
/// an empty board first.
pub fn export_with(
    exporter: &impl BoardExporter,
    state: &MoodboardState,
    layout: &impl CanvasLayout,
    format: ExportFormat,
    destination: &Path,
) -> Result<CaptureScope, ExportError> {
    if !exporter.formats().contains(&format) {
        return Err(ExportError::UnsupportedFormat(format));
    }
    let scope = CaptureScope::of(state, layout);
    if scope.is_empty() {
        return Err(ExportError::EmptyBoard);
    }
    exporter.export(&scope, format, destination)?;
    tracing::info!(
        format = %format,
        destination = %destination.display(),
        segments = scope.segments.len(),
        "exported board"
    );
    Ok(scope)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::app::action::Action;
    use crate::app::reducer::reduce;
    use crate::app::selection::StackedLayout;
    use crate::domain::board::{SegmentPatch, StickerDraft};
    use std::sync::Mutex;

    #[derive(Default)]
    struct RecordingExporter {
        captured: Mutex<Vec<usize>>,
    }

    impl BoardExporter for RecordingExporter {
        fn formats(&self) -> &[ExportFormat] {
            &[ExportFormat::Png]
        }

        fn export(
            &self,
            scope: &CaptureScope,
            _format: ExportFormat,
            _destination: &Path,
        ) -> Result<(), ExportError> {
            self.captured.lock().unwrap().push(scope.sticker_count());
            Ok(())
        }
    }

    fn board() -> MoodboardState {
        let mut state = MoodboardState::default();
        for (id, z) in [("top", 5), ("bottom", 1), ("middle", 3)] {
            state = reduce(
                &state,
                Action::AddSticker {
                    sticker: StickerDraft::text(id, "day-1", id).layered(z),
                },
            )
            .unwrap();
        }
        state
    }

    #[test]
    fn stickers_are_captured_bottom_to_top() {
        let scope = CaptureScope::of(&board(), &StackedLayout::default());
        let ids: Vec<&str> = scope.segments[0]
            .stickers
            .iter()
            .map(|s| s.id.as_str())
            .collect();
        assert_eq!(ids, ["bottom", "middle", "top"]);
        assert_eq!(scope.bounds(), Some(Rect::new(0.0, 0.0, 800.0, 600.0)));
    }

    #[test]
    fn collapsed_segments_hide_their_stickers() {
        let state = reduce(
            &board(),
            Action::UpdateSegment {
                id: "day-1".into(),
                patch: SegmentPatch {
                    collapsed: Some(true),
                    ..SegmentPatch::default()
                },
            },
        )
        .unwrap();
        let scope = CaptureScope::of(&state, &StackedLayout::default());
        assert_eq!(scope.sticker_count(), 0);
        assert_eq!(scope.segments.len(), 1);
    }

    #[test]
    fn export_checks_format_and_emptiness() {
        let exporter = RecordingExporter::default();
        let layout = StackedLayout::default();
        let out = Path::new("board.png");

        assert_eq!(
            export_with(&exporter, &board(), &layout, ExportFormat::Pdf, out),
            Err(ExportError::UnsupportedFormat(ExportFormat::Pdf))
        );
        assert_eq!(
            export_with(&exporter, &MoodboardState::empty(), &layout, ExportFormat::Png, out),
            Err(ExportError::EmptyBoard)
        );

        let scope = export_with(&exporter, &board(), &layout, ExportFormat::Png, out).unwrap();
        assert_eq!(scope.sticker_count(), 3);
        assert_eq!(*exporter.captured.lock().unwrap(), vec![3]);
    }
}
