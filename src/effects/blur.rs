use crate::foundation::error::{AdError, AdResult};

/// How samples that fall outside the buffer are treated.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum EdgeMode {
    /// Repeat the nearest edge pixel; a flat image stays flat.
    Clamp,
    /// Count outside samples as transparent, like canvas `blur()`; edges fade out.
    Transparent,
}

/// Kernel half-width covering three standard deviations.
pub fn blur_radius(sigma: f64) -> u32 {
    if !sigma.is_finite() || sigma <= 0.0 {
        return 0;
    }
    (sigma * 3.0).ceil() as u32
}

/// Sampled, normalized 1D Gaussian.
#[derive(Clone, Debug, PartialEq)]
pub struct GaussianKernel {
    radius: usize,
    weights: Vec<f32>,
}

impl GaussianKernel {
    /// Kernel for `sigma`, or `None` when the blur would be a no-op.
    pub fn new(sigma: f64) -> Option<Self> {
        let radius = blur_radius(sigma) as usize;
        if radius == 0 {
            return None;
        }
        let two_sigma_sq = 2.0 * sigma * sigma;
        let raw: Vec<f64> = (0..=2 * radius)
            .map(|i| {
                let d = i as f64 - radius as f64;
                (-d * d / two_sigma_sq).exp()
            })
            .collect();
        let total: f64 = raw.iter().sum();
        Some(Self {
            radius,
            weights: raw.iter().map(|w| (w / total) as f32).collect(),
        })
    }

    /// Samples on each side of the center tap.
    pub fn radius(&self) -> usize {
        self.radius
    }

    /// Taps from `-radius` to `+radius`; they sum to 1.
    pub fn weights(&self) -> &[f32] {
        &self.weights
    }
}

type Px = [f32; 4];

/// Separable Gaussian blur over a premultiplied RGBA8 buffer.
///
/// A non-positive `sigma` returns the input unchanged.
pub fn blur_rgba8_premul(
    src: &[u8],
    width: u32,
    height: u32,
    sigma: f64,
    edge: EdgeMode,
) -> AdResult<Vec<u8>> {
    let (w, h) = (width as usize, height as usize);
    let expected = w
        .checked_mul(h)
        .and_then(|n| n.checked_mul(4))
        .ok_or_else(|| AdError::surface(format!("{width}x{height} blur buffer is too large")))?;
    if src.len() != expected {
        return Err(AdError::validation(format!(
            "blur buffer holds {} bytes, a {width}x{height} image needs {expected}",
            src.len()
        )));
    }
    let Some(kernel) = GaussianKernel::new(sigma) else {
        return Ok(src.to_vec());
    };
    if expected == 0 {
        return Ok(Vec::new());
    }

    let mut plane: Vec<Px> = src
        .chunks_exact(4)
        .map(|p| [p[0], p[1], p[2], p[3]].map(f32::from))
        .collect();
    let mut scratch = Vec::with_capacity(w.max(h));

    for row in plane.chunks_exact_mut(w) {
        convolve_line(row, &kernel, edge, &mut scratch);
    }

    let mut column: Vec<Px> = vec![[0.0; 4]; h];
    for x in 0..w {
        for (y, px) in column.iter_mut().enumerate() {
            *px = plane[y * w + x];
        }
        convolve_line(&mut column, &kernel, edge, &mut scratch);
        for (y, px) in column.iter().enumerate() {
            plane[y * w + x] = *px;
        }
    }

    Ok(plane.iter().flat_map(|px| px.map(channel_to_u8)).collect())
}

fn convolve_line(line: &mut [Px], kernel: &GaussianKernel, edge: EdgeMode, scratch: &mut Vec<Px>) {
    scratch.clear();
    scratch.extend_from_slice(line);
    let last = line.len() - 1;
    let r = kernel.radius;

    for (i, out) in line.iter_mut().enumerate() {
        let mut acc: Px = [0.0; 4];
        for (tap, &weight) in kernel.weights.iter().enumerate() {
            // Sample index is i + tap - r, kept in usize space.
            let j = (i + tap).checked_sub(r);
            let px = match (edge, j) {
                (_, Some(j)) if j <= last => scratch[j],
                (EdgeMode::Clamp, Some(_)) => scratch[last],
                (EdgeMode::Clamp, None) => scratch[0],
                (EdgeMode::Transparent, _) => continue,
            };
            for (a, c) in acc.iter_mut().zip(px) {
                *a += weight * c;
            }
        }
        *out = acc;
    }
}

fn channel_to_u8(v: f32) -> u8 {
    v.round().clamp(0.0, 255.0) as u8
}

#[cfg(test)]
#[path = "../../tests/unit/effects/blur.rs"]
mod tests;
