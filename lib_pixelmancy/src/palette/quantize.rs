use crate::color::Color;

#[derive(Debug, Clone, Copy)]
struct Entry {
    index: usize,
    color: Color,
    weight: u64,
}

/// A box of table entries for median cut subdivision.
#[derive(Debug, Clone)]
struct ColorBox {
    entries: Vec<Entry>,
}

impl ColorBox {
    fn new(entries: Vec<Entry>) -> Self {
        Self { entries }
    }

    fn total_weight(&self) -> u64 {
        self.entries.iter().map(|e| e.weight).sum()
    }

    /// Range (max - min) along each RGBA channel.
    fn ranges(&self) -> [u8; 4] {
        let mut min = [u8::MAX; 4];
        let mut max = [u8::MIN; 4];

        for entry in &self.entries {
            for (channel, value) in entry.color.to_array().into_iter().enumerate() {
                min[channel] = min[channel].min(value);
                max[channel] = max[channel].max(value);
            }
        }

        [0, 1, 2, 3].map(|c| max[c].saturating_sub(min[c]))
    }

    fn widest_channel(&self) -> usize {
        let ranges = self.ranges();
        // First channel wins ties so the choice is reproducible.
        (0..4).fold(0, |best, c| if ranges[c] > ranges[best] { c } else { best })
    }

    /// Heavier boxes with more color variation split first.
    fn priority(&self) -> u128 {
        let volume = self.ranges().into_iter().max().unwrap_or(0) as u128;
        (self.total_weight() as u128 + self.entries.len() as u128) * (volume + 1)
    }

    fn first_index(&self) -> usize {
        self.entries.iter().map(|e| e.index).min().unwrap_or(usize::MAX)
    }

    /// Weighted mean color. Falls back to a plain mean when nothing in the box
    /// carries weight.
    fn centroid(&self) -> Color {
        let total = self.total_weight();
        let weight_of = |e: &Entry| if total == 0 { 1 } else { e.weight };
        let divisor: u64 = self.entries.iter().map(weight_of).sum();
        if divisor == 0 {
            return Color::default();
        }

        let mut sums = [0u64; 4];
        for entry in &self.entries {
            let w = weight_of(entry);
            for (channel, value) in entry.color.to_array().into_iter().enumerate() {
                sums[channel] += value as u64 * w;
            }
        }

        let [red, green, blue, alpha] =
            sums.map(|sum| ((sum + divisor / 2) / divisor).min(u8::MAX as u64) as u8);
        Color::new(red, green, blue, alpha)
    }

    /// Splits along the widest channel at the weighted median.
    fn split(mut self) -> (ColorBox, ColorBox) {
        let channel = self.widest_channel();
        self.entries
            .sort_unstable_by_key(|e| (e.color.to_array()[channel], e.index));

        let len = self.entries.len();
        let total = self.total_weight();
        let mut split_idx = len / 2;

        if total > 0 {
            let mut accumulated = 0u64;
            for (i, entry) in self.entries.iter().enumerate() {
                accumulated += entry.weight;
                if accumulated * 2 >= total && i + 1 < len {
                    split_idx = i + 1;
                    break;
                }
            }
        }

        // At least one entry per side
        let split_idx = split_idx.clamp(1, len - 1);

        let right = self.entries.split_off(split_idx);
        (ColorBox::new(self.entries), ColorBox::new(right))
    }
}

/// Result of a median cut: one representative color per box and, for every
/// input color, the box it ended up in.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Partition {
    pub representatives: Vec<Color>,
    pub assignment: Vec<usize>,
}

/// Weighted median cut over the given colors.
///
/// `weights[i]` is the weight of `colors[i]`; missing weights count as zero.
/// Produces at most `max_colors` boxes. Boxes are ordered by the lowest input
/// position they contain, so the output keeps the relative order of the input.
pub fn median_cut(colors: &[Color], weights: &[u64], max_colors: usize) -> Partition {
    if colors.is_empty() || max_colors == 0 {
        return Partition {
            representatives: Vec::new(),
            assignment: Vec::new(),
        };
    }

    let entries = colors
        .iter()
        .enumerate()
        .map(|(index, &color)| Entry {
            index,
            color,
            weight: weights.get(index).copied().unwrap_or(0),
        })
        .collect();

    let mut boxes = Vec::with_capacity(max_colors);
    boxes.push(ColorBox::new(entries));

    while boxes.len() < max_colors {
        let best_idx = boxes
            .iter()
            .enumerate()
            .filter(|(_, b)| b.entries.len() >= 2)
            .max_by_key(|(i, b)| (b.priority(), std::cmp::Reverse(*i)))
            .map(|(i, _)| i);

        let Some(idx) = best_idx else {
            break;
        };

        let to_split = boxes.swap_remove(idx);
        let (left, right) = to_split.split();
        boxes.push(left);
        boxes.push(right);
    }

    boxes.sort_by_key(ColorBox::first_index);

    let mut assignment = vec![0; colors.len()];
    for (box_idx, color_box) in boxes.iter().enumerate() {
        for entry in &color_box.entries {
            assignment[entry.index] = box_idx;
        }
    }

    Partition {
        representatives: boxes.iter().map(ColorBox::centroid).collect(),
        assignment,
    }
}
