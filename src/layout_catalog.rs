//! Slot templates for the collage layout engine.
//!
//! The catalog maps (photo count, portrait bucket) to a hand-authored
//! partition of the available area for counts 1 through 5. Counts beyond the
//! catalog fall back to a uniform grid. Slot geometry is expressed as
//! fractions of the available width/height with the spacing unit subtracted
//! at internal seams, so rendered photos never touch. Right and bottom
//! neighbors are computed as remainders, which keeps every slot inside the
//! canvas regardless of integer truncation.
//!
//! Slot order matters: slot[i] is always paired with the i-th photo of the
//! aspect-sorted collection, so the narrowest photo lands in whichever slot a
//! template reserves for it.

/// A rectangular region of the canvas that one photo is mapped onto.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Slot {
    pub width: u32,
    pub height: u32,
    pub x: u32,
    pub y: u32,
}

impl Slot {
    fn new(width: u32, height: u32, x: u32, y: u32) -> Self {
        Slot {
            width: width.max(1),
            height: height.max(1),
            x,
            y,
        }
    }
}

/// The area a template partitions: available width/height and the gap kept
/// between adjacent slots.
#[derive(Debug, Clone, Copy)]
pub struct Frame {
    pub width: u32,
    pub height: u32,
    pub spacing: u32,
}

/// Portrait-count bucket used to key the catalog.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum PortraitBucket {
    None,
    One,
    Two,
    ThreePlus,
}

impl PortraitBucket {
    pub fn from_count(portraits: usize) -> Self {
        match portraits {
            0 => PortraitBucket::None,
            1 => PortraitBucket::One,
            2 => PortraitBucket::Two,
            _ => PortraitBucket::ThreePlus,
        }
    }
}

/// A named catalog entry: an ordered slot-geometry generator for a fixed
/// photo count.
pub struct Template {
    pub name: &'static str,
    pub photo_count: usize,
    generate: fn(Frame) -> Vec<Slot>,
}

impl Template {
    pub fn slots(&self, frame: Frame) -> Vec<Slot> {
        let slots = (self.generate)(frame);
        debug_assert_eq!(slots.len(), self.photo_count);
        slots
    }
}

fn fr(value: u32, fraction: f64) -> u32 {
    (value as f64 * fraction) as u32
}

// -- count 1 --------------------------------------------------------------

fn one_full(f: Frame) -> Vec<Slot> {
    vec![Slot::new(f.width, f.height, 0, 0)]
}

// -- count 2 --------------------------------------------------------------

/// Two equal-width columns.
fn two_columns(f: Frame) -> Vec<Slot> {
    let col = (f.width.saturating_sub(f.spacing)) / 2;
    vec![
        Slot::new(col, f.height, 0, 0),
        Slot::new(col, f.height, col + f.spacing, 0),
    ]
}

/// Narrow portrait column left, the landscape takes the rest.
fn two_golden(f: Frame) -> Vec<Slot> {
    let portrait_width = fr(f.width, 0.4);
    let landscape_width = f.width.saturating_sub(portrait_width + f.spacing);
    vec![
        Slot::new(portrait_width, f.height, 0, 0),
        Slot::new(landscape_width, f.height, portrait_width + f.spacing, 0),
    ]
}

// -- count 3 --------------------------------------------------------------

/// One wide slot on top, two below side by side.
fn three_big_top(f: Frame) -> Vec<Slot> {
    let top_height = fr(f.height, 0.6).saturating_sub(f.spacing);
    let bottom_y = fr(f.height, 0.6);
    let bottom_height = f.height - bottom_y;
    let left_width = fr(f.width, 0.5);
    let right_width = f.width.saturating_sub(left_width + f.spacing);
    vec![
        Slot::new(f.width, top_height, 0, 0),
        Slot::new(left_width, bottom_height, 0, bottom_y),
        Slot::new(right_width, bottom_height, left_width + f.spacing, bottom_y),
    ]
}

/// Tall portrait column left, two landscapes stacked right.
fn three_portrait_left(f: Frame) -> Vec<Slot> {
    let left_width = fr(f.width, 0.4);
    let right_x = left_width + f.spacing;
    let right_width = f.width.saturating_sub(right_x);
    let top_height = fr(f.height, 0.5);
    let bottom_y = top_height + f.spacing;
    let bottom_height = f.height - bottom_y;
    vec![
        Slot::new(left_width, f.height, 0, 0),
        Slot::new(right_width, top_height, right_x, 0),
        Slot::new(right_width, bottom_height, right_x, bottom_y),
    ]
}

/// Three equal columns.
fn three_columns(f: Frame) -> Vec<Slot> {
    column_row(f, 3, f.height, 0)
}

// -- count 4 --------------------------------------------------------------

/// Four landscapes in two uneven rows; the widest photos get the wider
/// slots (top-right and bottom-left).
fn four_landscapes(f: Frame) -> Vec<Slot> {
    let narrow = fr(f.width, 0.45);
    let wide = fr(f.width, 0.55);
    let top_height = fr(f.height, 0.55).saturating_sub(f.spacing);
    let bottom_y = fr(f.height, 0.55);
    let bottom_height = f.height - bottom_y;
    vec![
        Slot::new(narrow, top_height, 0, 0),
        Slot::new(
            f.width.saturating_sub(wide + f.spacing),
            bottom_height,
            wide + f.spacing,
            bottom_y,
        ),
        Slot::new(wide, bottom_height, 0, bottom_y),
        Slot::new(f.width.saturating_sub(narrow + f.spacing), top_height, narrow + f.spacing, 0),
    ]
}

/// Tall portrait left, one landscape on top right, two small slots below it.
fn four_portrait_left(f: Frame) -> Vec<Slot> {
    let left_width = fr(f.width, 0.4);
    let right_x = left_width + f.spacing;
    let top_height = fr(f.height, 0.6);
    let bottom_y = top_height + f.spacing;
    let bottom_height = f.height - bottom_y;
    let small_width = fr(f.width, 0.3).saturating_sub(f.spacing);
    vec![
        Slot::new(left_width, f.height, 0, 0),
        Slot::new(f.width.saturating_sub(right_x), top_height, right_x, 0),
        Slot::new(small_width, bottom_height, right_x, bottom_y),
        Slot::new(
            f.width.saturating_sub(fr(f.width, 0.7) + f.spacing),
            bottom_height,
            fr(f.width, 0.7) + f.spacing,
            bottom_y,
        ),
    ]
}

/// Tall portrait left, landscape top right, a small portrait and a small
/// landscape below it.
fn four_two_portraits(f: Frame) -> Vec<Slot> {
    let left_width = fr(f.width, 0.4);
    let right_x = left_width + f.spacing;
    let top_height = fr(f.height, 0.6);
    let bottom_y = top_height + f.spacing;
    let bottom_height = f.height - bottom_y;
    let small_portrait_width = fr(f.width, 0.2);
    let last_x = fr(f.width, 0.6) + 2 * f.spacing;
    vec![
        Slot::new(left_width, f.height, 0, 0),
        Slot::new(small_portrait_width, bottom_height, right_x, bottom_y),
        Slot::new(f.width.saturating_sub(right_x), top_height, right_x, 0),
        Slot::new(f.width.saturating_sub(last_x), bottom_height, last_x, bottom_y),
    ]
}

/// Tall portrait left, a flat landscape on top right, two portrait-ish slots
/// below it.
fn four_three_portraits(f: Frame) -> Vec<Slot> {
    let left_width = fr(f.width, 0.4);
    let right_x = left_width + f.spacing;
    let top_height = fr(f.height, 0.4);
    let bottom_y = top_height + f.spacing;
    let bottom_height = f.height - bottom_y;
    let second_width = fr(f.width, 0.25);
    let last_x = fr(f.width, 0.65) + 2 * f.spacing;
    vec![
        Slot::new(left_width, f.height, 0, 0),
        Slot::new(second_width, bottom_height, right_x, bottom_y),
        Slot::new(f.width.saturating_sub(last_x), bottom_height, last_x, bottom_y),
        Slot::new(f.width.saturating_sub(right_x), top_height, right_x, 0),
    ]
}

// -- count 5 --------------------------------------------------------------

/// Two large slots on top, three equal columns below.
fn five_landscapes(f: Frame) -> Vec<Slot> {
    let left_width = fr(f.width, 0.5);
    let top_height = fr(f.height, 0.6).saturating_sub(f.spacing);
    let bottom_y = fr(f.height, 0.6);
    let mut slots = vec![
        Slot::new(left_width, top_height, 0, 0),
        Slot::new(
            f.width.saturating_sub(left_width + f.spacing),
            top_height,
            left_width + f.spacing,
            0,
        ),
    ];
    slots.extend(column_row(f, 3, f.height - bottom_y, bottom_y));
    slots
}

/// Narrow portrait top left, a wide landscape beside it, three columns below.
/// The bottom row is filled right to left so the widest remaining photos end
/// up leftmost, as the original layouts did.
fn five_one_portrait(f: Frame) -> Vec<Slot> {
    five_top_split(f, 0.3)
}

/// Two portrait halves on top, three columns below.
fn five_two_portraits(f: Frame) -> Vec<Slot> {
    five_top_split(f, 0.5)
}

fn five_top_split(f: Frame, left_fraction: f64) -> Vec<Slot> {
    let left_width = fr(f.width, left_fraction);
    let top_height = fr(f.height, 2.0 / 3.0).saturating_sub(f.spacing);
    let bottom_y = fr(f.height, 2.0 / 3.0);
    let mut slots = vec![
        Slot::new(left_width, top_height, 0, 0),
        Slot::new(
            f.width.saturating_sub(left_width + f.spacing),
            top_height,
            left_width + f.spacing,
            0,
        ),
    ];
    let mut bottom = column_row(f, 3, f.height - bottom_y, bottom_y);
    bottom.reverse();
    slots.extend(bottom);
    slots
}

/// Full-height portrait on the far left, four slots in a golden-ratio split
/// beside it.
fn five_three_portraits(f: Frame) -> Vec<Slot> {
    let first_width = fr(f.width, 0.35).saturating_sub(f.spacing);
    let inner_x = fr(f.width, 0.35);
    let top_height = fr(f.height, 0.55).saturating_sub(f.spacing);
    let bottom_y = fr(f.height, 0.55);
    let bottom_height = f.height - bottom_y;
    let top_right_x = fr(f.width, 0.6) + f.spacing;
    let bottom_right_x = fr(f.width, 0.75) + f.spacing;
    vec![
        Slot::new(first_width, f.height, 0, 0),
        Slot::new(fr(f.width, 0.25), top_height, inner_x, 0),
        Slot::new(f.width.saturating_sub(top_right_x), top_height, top_right_x, 0),
        Slot::new(fr(f.width, 0.4), bottom_height, inner_x, bottom_y),
        Slot::new(
            f.width.saturating_sub(bottom_right_x),
            bottom_height,
            bottom_right_x,
            bottom_y,
        ),
    ]
}

/// A row of `count` equal columns at `y` with height `height`.
fn column_row(f: Frame, count: u32, height: u32, y: u32) -> Vec<Slot> {
    let col = (f.width.saturating_sub((count - 1) * f.spacing)) / count;
    (0..count)
        .map(|i| Slot::new(col, height, i * (col + f.spacing), y))
        .collect()
}

// -- catalog --------------------------------------------------------------

static SINGLE: Template = Template {
    name: "single",
    photo_count: 1,
    generate: one_full,
};
static TWO_COLUMNS: Template = Template {
    name: "two-columns",
    photo_count: 2,
    generate: two_columns,
};
static TWO_GOLDEN: Template = Template {
    name: "two-golden",
    photo_count: 2,
    generate: two_golden,
};
static THREE_BIG_TOP: Template = Template {
    name: "three-big-top",
    photo_count: 3,
    generate: three_big_top,
};
static THREE_PORTRAIT_LEFT: Template = Template {
    name: "three-portrait-left",
    photo_count: 3,
    generate: three_portrait_left,
};
static THREE_COLUMNS: Template = Template {
    name: "three-columns",
    photo_count: 3,
    generate: three_columns,
};
static FOUR_LANDSCAPES: Template = Template {
    name: "four-landscapes",
    photo_count: 4,
    generate: four_landscapes,
};
static FOUR_PORTRAIT_LEFT: Template = Template {
    name: "four-portrait-left",
    photo_count: 4,
    generate: four_portrait_left,
};
static FOUR_TWO_PORTRAITS: Template = Template {
    name: "four-two-portraits",
    photo_count: 4,
    generate: four_two_portraits,
};
static FOUR_THREE_PORTRAITS: Template = Template {
    name: "four-three-portraits",
    photo_count: 4,
    generate: four_three_portraits,
};
static FIVE_LANDSCAPES: Template = Template {
    name: "five-landscapes",
    photo_count: 5,
    generate: five_landscapes,
};
static FIVE_ONE_PORTRAIT: Template = Template {
    name: "five-one-portrait",
    photo_count: 5,
    generate: five_one_portrait,
};
static FIVE_TWO_PORTRAITS: Template = Template {
    name: "five-two-portraits",
    photo_count: 5,
    generate: five_two_portraits,
};
static FIVE_THREE_PORTRAITS: Template = Template {
    name: "five-three-portraits",
    photo_count: 5,
    generate: five_three_portraits,
};

/// Looks up the catalog entry for a photo count and portrait count. Returns
/// `None` for counts the catalog does not cover (0, or 6 and beyond).
pub fn select(count: usize, portraits: usize) -> Option<&'static Template> {
    let bucket = PortraitBucket::from_count(portraits);
    let template = match (count, bucket) {
        (1, _) => &SINGLE,
        (2, PortraitBucket::None) => &TWO_COLUMNS,
        (2, _) => &TWO_GOLDEN,
        (3, PortraitBucket::None) => &THREE_BIG_TOP,
        (3, PortraitBucket::One) => &THREE_PORTRAIT_LEFT,
        (3, _) => &THREE_COLUMNS,
        (4, PortraitBucket::None) => &FOUR_LANDSCAPES,
        (4, PortraitBucket::One) => &FOUR_PORTRAIT_LEFT,
        (4, PortraitBucket::Two) => &FOUR_TWO_PORTRAITS,
        (4, PortraitBucket::ThreePlus) => &FOUR_THREE_PORTRAITS,
        (5, PortraitBucket::None) => &FIVE_LANDSCAPES,
        (5, PortraitBucket::One) => &FIVE_ONE_PORTRAIT,
        (5, PortraitBucket::Two) => &FIVE_TWO_PORTRAITS,
        (5, PortraitBucket::ThreePlus) => &FIVE_THREE_PORTRAITS,
        _ => return None,
    };
    Some(template)
}

/// Uniform row/column grid for counts beyond the catalog. Deliberately not
/// orientation-aware: photos are assigned row-major in aspect-sorted order.
pub fn grid_slots(count: usize, frame: Frame) -> Vec<Slot> {
    let rows = ((count as f64).sqrt() as usize).max(1);
    let cols = count.div_ceil(rows);
    let cell_width = (frame
        .width
        .saturating_sub((cols as u32 - 1) * frame.spacing)
        / cols as u32)
        .max(1);
    let cell_height = (frame
        .height
        .saturating_sub((rows as u32 - 1) * frame.spacing)
        / rows as u32)
        .max(1);

    // Offsets from the clamped cell size; in frames too small for the
    // spacing budget, overflowing cells pin to the far edge.
    (0..count)
        .map(|i| {
            let row = (i / cols) as u32;
            let col = (i % cols) as u32;
            let x = (col * (cell_width + frame.spacing))
                .min(frame.width.saturating_sub(cell_width));
            let y = (row * (cell_height + frame.spacing))
                .min(frame.height.saturating_sub(cell_height));
            Slot::new(cell_width, cell_height, x, y)
        })
        .collect()
}

/// Layout selector: one slot per photo, catalog template if there is one,
/// grid fallback otherwise.
pub fn slots_for(count: usize, portraits: usize, frame: Frame) -> Vec<Slot> {
    match select(count, portraits) {
        Some(template) => template.slots(frame),
        None => grid_slots(count, frame),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    const FRAME: Frame = Frame {
        width: 900,
        height: 600,
        spacing: 10,
    };

    fn assert_within_bounds(slots: &[Slot], frame: Frame) {
        for slot in slots {
            assert!(
                slot.x + slot.width <= frame.width,
                "slot {:?} exceeds width {}",
                slot,
                frame.width
            );
            assert!(
                slot.y + slot.height <= frame.height,
                "slot {:?} exceeds height {}",
                slot,
                frame.height
            );
            assert!(slot.width >= 1 && slot.height >= 1);
        }
    }

    #[test]
    fn test_portrait_bucket() {
        assert_eq!(PortraitBucket::from_count(0), PortraitBucket::None);
        assert_eq!(PortraitBucket::from_count(1), PortraitBucket::One);
        assert_eq!(PortraitBucket::from_count(2), PortraitBucket::Two);
        assert_eq!(PortraitBucket::from_count(3), PortraitBucket::ThreePlus);
        assert_eq!(PortraitBucket::from_count(9), PortraitBucket::ThreePlus);
    }

    #[test]
    fn test_every_catalog_entry_stays_within_bounds() {
        for count in 1..=5 {
            for portraits in 0..=count {
                let slots = slots_for(count, portraits, FRAME);
                assert_eq!(slots.len(), count, "count={} portraits={}", count, portraits);
                assert_within_bounds(&slots, FRAME);
            }
        }
    }

    #[test]
    fn test_single_fills_frame() {
        let slots = slots_for(1, 0, FRAME);
        assert_eq!(slots, vec![Slot { width: 900, height: 600, x: 0, y: 0 }]);
    }

    #[test]
    fn test_two_golden_partition_is_complete() {
        // portrait width + landscape width + one spacing unit == available width
        let slots = slots_for(2, 1, FRAME);
        assert_eq!(slots[0].width, 360);
        assert_eq!(slots[1].width, 530);
        assert_eq!(slots[0].width + slots[1].width + FRAME.spacing, FRAME.width);
        assert_eq!(slots[0].height, 600);
        assert_eq!(slots[1].height, 600);
        assert_eq!(slots[1].x, 370);
    }

    #[test]
    fn test_two_landscapes_get_equal_columns() {
        let slots = slots_for(2, 0, FRAME);
        assert_eq!(slots[0].width, slots[1].width);
        assert_eq!(slots[1].x, slots[0].width + FRAME.spacing);
    }

    #[test]
    fn test_three_portrait_left_column_spans_full_height() {
        let slots = slots_for(3, 1, FRAME);
        assert_eq!(slots[0].height, FRAME.height);
        assert_eq!(slots[1].x, slots[2].x);
        // stacked right side covers the full height including one seam
        assert_eq!(
            slots[1].height + FRAME.spacing + slots[2].height,
            FRAME.height
        );
    }

    #[test]
    fn test_four_landscapes_rows_meet_at_seam() {
        let slots = slots_for(4, 0, FRAME);
        // top row: slots 0 and 3, bottom row: slots 2 and 1
        assert_eq!(slots[0].y, 0);
        assert_eq!(slots[3].y, 0);
        assert_eq!(slots[2].y, slots[1].y);
        assert_eq!(slots[0].width + slots[3].width + FRAME.spacing, FRAME.width);
        assert_eq!(slots[2].width + slots[1].width + FRAME.spacing, FRAME.width);
    }

    #[test]
    fn test_five_three_portraits_narrowest_photo_gets_tall_slot() {
        let slots = slots_for(5, 3, FRAME);
        assert_eq!(slots[0].height, FRAME.height);
        assert!(slots[0].width < slots[3].width + slots[4].width);
    }

    #[test]
    fn test_catalog_misses_fall_back_to_grid() {
        assert!(select(0, 0).is_none());
        assert!(select(6, 0).is_none());
        assert!(select(12, 4).is_none());
    }

    #[test]
    fn test_grid_dimensions() {
        // 6 photos: rows = floor(sqrt(6)) = 2, cols = ceil(6/2) = 3
        let slots = grid_slots(6, FRAME);
        assert_eq!(slots.len(), 6);
        let cell_width = (900 - 2 * 10) / 3;
        let cell_height = (600 - 10) / 2;
        for slot in &slots {
            assert_eq!(slot.width, cell_width);
            assert_eq!(slot.height, cell_height);
        }
        // row-major assignment
        assert_eq!(slots[0].x, 0);
        assert_eq!(slots[2].x, 2 * (cell_width + 10));
        assert_eq!(slots[3].y, cell_height + 10);
        assert_within_bounds(&slots, FRAME);
    }

    #[test]
    fn test_grid_twelve_photos() {
        // rows = 3, cols = 4
        let slots = grid_slots(12, FRAME);
        assert_eq!(slots.len(), 12);
        assert_eq!(slots[11].x, slots[3].x);
        assert_eq!(slots[11].y, slots[8].y);
        assert_within_bounds(&slots, FRAME);
    }

    #[test]
    fn test_zero_spacing() {
        let frame = Frame {
            width: 800,
            height: 600,
            spacing: 0,
        };
        for count in 1..=8 {
            let slots = slots_for(count, count / 2, frame);
            assert_eq!(slots.len(), count);
            assert_within_bounds(&slots, frame);
        }
    }

    #[test]
    fn test_grid_stays_within_degenerate_frame() {
        // width is smaller than the spacing budget, cells shrink to a pixel
        let frame = Frame {
            width: 8,
            height: 8,
            spacing: 10,
        };
        for count in 6..=12 {
            let slots = grid_slots(count, frame);
            assert_eq!(slots.len(), count);
            assert_within_bounds(&slots, frame);
        }
    }

    #[test]
    fn test_tiny_frame_never_yields_zero_area_slots() {
        let frame = Frame {
            width: 8,
            height: 6,
            spacing: 10,
        };
        for count in 1..=9 {
            for portraits in 0..=count {
                for slot in slots_for(count, portraits, frame) {
                    assert!(slot.width >= 1 && slot.height >= 1);
                }
            }
        }
    }
}
