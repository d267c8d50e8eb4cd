use ndarray::{Array1, ArrayView1};

/// Numerically stable softmax: the row maximum is subtracted before exponentiation.
pub(crate) fn softmax(logits: ArrayView1<f32>) -> Array1<f32> {
    let max = logits.iter().copied().fold(f32::NEG_INFINITY, f32::max);
    let exps = logits.mapv(|x| (x - max).exp());
    let sum = exps.sum();
    exps / sum
}

/// Index of the largest value; the first one wins on ties.
pub(crate) fn argmax(values: ArrayView1<f32>) -> Option<usize> {
    values
        .iter()
        .enumerate()
        .fold(None, |best: Option<(usize, f32)>, (i, &v)| match best {
            Some((_, b)) if b >= v => best,
            _ => Some((i, v)),
        })
        .map(|(i, _)| i)
}
