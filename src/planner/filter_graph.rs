//! Filter graph construction for the 2x2 composite

use crate::domain::model::{CellSize, GRID_CLIPS};

/// Label of the composite video stream
pub const OUTPUT_LABEL: &str = "v";

/// An ffmpeg `-filter_complex` description built chain by chain
#[derive(Debug, Clone, PartialEq)]
pub struct FilterGraph {
    chains: Vec<String>,
}

impl FilterGraph {
    /// Four cells scaled into `cell`, paired into a top and bottom row and
    /// stacked vertically.
    pub fn quad_grid(cell: CellSize) -> Self {
        let mut chains: Vec<String> = (0..GRID_CLIPS).map(|i| cell_chain(i, cell)).collect();

        chains.push("[v0][v1]hstack=inputs=2[top]".to_string());
        chains.push("[v2][v3]hstack=inputs=2[bottom]".to_string());
        chains.push(format!("[top][bottom]vstack=inputs=2[{OUTPUT_LABEL}]"));

        Self { chains }
    }

    pub fn chains(&self) -> &[String] {
        &self.chains
    }

    pub fn render(&self) -> String {
        self.chains.join(";")
    }
}

/// Fit input `index` into the cell keeping aspect ratio, letterbox it to the
/// exact cell size and restart its timestamps at zero.
fn cell_chain(index: usize, cell: CellSize) -> String {
    let CellSize { width: w, height: h } = cell;
    format!(
        "[{index}:v]scale={w}:{h}:force_original_aspect_ratio=decrease,\
         pad={w}:{h}:(ow-iw)/2:(oh-ih)/2,setpts=PTS-STARTPTS[v{index}]"
    )
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_cell_chain() {
        let chain = cell_chain(2, CellSize { width: 640, height: 360 });
        assert_eq!(
            chain,
            "[2:v]scale=640:360:force_original_aspect_ratio=decrease,\
             pad=640:360:(ow-iw)/2:(oh-ih)/2,setpts=PTS-STARTPTS[v2]"
        );
    }

    #[test]
    fn test_quad_grid_structure() {
        let graph = FilterGraph::quad_grid(CellSize { width: 960, height: 540 });
        let chains = graph.chains();
        assert_eq!(chains.len(), 7);
        for (i, chain) in chains[..4].iter().enumerate() {
            assert!(chain.starts_with(&format!("[{i}:v]scale=960:540:")));
            assert!(chain.ends_with(&format!("[v{i}]")));
        }
        assert_eq!(chains[4], "[v0][v1]hstack=inputs=2[top]");
        assert_eq!(chains[5], "[v2][v3]hstack=inputs=2[bottom]");
        assert_eq!(chains[6], "[top][bottom]vstack=inputs=2[v]");
    }

    #[test]
    fn test_render_joins_with_semicolons() {
        let rendered = FilterGraph::quad_grid(CellSize { width: 2, height: 2 }).render();
        assert_eq!(rendered.matches(';').count(), 6);
        assert!(rendered.ends_with("[top][bottom]vstack=inputs=2[v]"));
    }
}
