/// One cluster of similar pixels.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Swatch {
    pub rgb: [u8; 3],
    pub population: usize,
}

/// Median cut over the RGB cube.
///
/// Repeatedly splits the box with the widest channel range at its median
/// until `count` boxes exist or no box can be split further. Boxes that
/// average to the same color are merged. Swatches are returned most
/// populous first, ties broken by color so the result is
/// deterministic.
pub fn median_cut(pixels: &[[u8; 3]], count: usize) -> Vec<Swatch> {
    if pixels.is_empty() || count == 0 {
        return Vec::new();
    }

    let mut boxes: Vec<Vec<[u8; 3]>> = vec![pixels.to_vec()];
    while boxes.len() < count {
        let widest = boxes
            .iter()
            .enumerate()
            .map(|(i, b)| (i, widest_channel(b)))
            .filter(|(_, (_, range))| *range > 0)
            .max_by_key(|(i, (_, range))| (*range, boxes[*i].len()));

        let Some((index, (channel, _))) = widest else {
            break;
        };

        let mut target = boxes.swap_remove(index);
        target.sort_unstable_by_key(|p| p[channel]);
        let upper = target.split_off(target.len() / 2);
        boxes.push(target);
        boxes.push(upper);
    }

    // Equal colors may land in sibling boxes; fold them back together.
    let mut swatches: Vec<Swatch> = Vec::with_capacity(boxes.len());
    for swatch in boxes.iter().map(|b| average(b)) {
        match swatches.iter_mut().find(|s| s.rgb == swatch.rgb) {
            Some(existing) => existing.population += swatch.population,
            None => swatches.push(swatch),
        }
    }
    swatches.sort_by(|a, b| b.population.cmp(&a.population).then(a.rgb.cmp(&b.rgb)));
    swatches
}

/// `(channel index, max - min)` of the channel with the largest spread.
fn widest_channel(pixels: &[[u8; 3]]) -> (usize, u8) {
    let mut min = [u8::MAX; 3];
    let mut max = [u8::MIN; 3];
    for p in pixels {
        for c in 0..3 {
            min[c] = min[c].min(p[c]);
            max[c] = max[c].max(p[c]);
        }
    }
    (0..3)
        .map(|c| (c, max[c].saturating_sub(min[c])))
        .max_by_key(|&(c, range)| (range, std::cmp::Reverse(c)))
        .unwrap_or((0, 0))
}

fn average(pixels: &[[u8; 3]]) -> Swatch {
    let mut sum = [0u64; 3];
    for p in pixels {
        for c in 0..3 {
            sum[c] += u64::from(p[c]);
        }
    }
    let n = pixels.len().max(1) as u64;
    let channel = |c: usize| ((sum[c] + n / 2) / n) as u8;
    Swatch {
        rgb: [channel(0), channel(1), channel(2)],
        population: pixels.len(),
    }
}
