//! Drawing imposed pages onto a canvas

use crate::canvas::{Canvas, Point};
use crate::impose::ImposedPage;
use crate::metrics::LayoutContext;
use crate::options::PageGeometry;

/// Open one canvas page per imposed page and draw each column top-down
pub fn render_booklet(
    pages: &[ImposedPage],
    geometry: &PageGeometry,
    canvas: &mut dyn Canvas,
    ctx: &LayoutContext<'_>,
) {
    for page in pages {
        canvas.new_page(geometry.page_width_mm, geometry.page_height_mm);
        for column in &page.columns {
            let mut y = geometry.margin_mm;
            for block in &column.page.blocks {
                y += block.draw(canvas, ctx, Point::new(column.x_mm, y));
            }
        }
    }
}
