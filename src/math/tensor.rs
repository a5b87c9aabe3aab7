use rand::prelude::*;
use serde::{Serialize, Deserialize};

/// Dense 4-D tensor with dimensions (height, width, channels, batch).
///
/// This is the shape convention of convolutional network toolboxes: a batch
/// of `batch` feature maps, each `height × width` with `channels` values per
/// spatial location. Storage is a flat `Vec<f64>`, row-major over
/// (batch, channel, height, width).
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Tensor4 {
    pub height: usize,
    pub width: usize,
    pub channels: usize,
    pub batch: usize,
    pub data: Vec<f64>,
}

impl Tensor4 {
    pub fn zeros(height: usize, width: usize, channels: usize, batch: usize) -> Tensor4 {
        Tensor4 {
            height,
            width,
            channels,
            batch,
            data: vec![0.0; height * width * channels * batch],
        }
    }

    pub fn filled(height: usize, width: usize, channels: usize, batch: usize, value: f64) -> Tensor4 {
        Tensor4 {
            height,
            width,
            channels,
            batch,
            data: vec![value; height * width * channels * batch],
        }
    }

    /// Builds a tensor from a flat data vector, row-major over
    /// (batch, channel, height, width).
    pub fn from_data(height: usize, width: usize, channels: usize, batch: usize, data: Vec<f64>) -> Tensor4 {
        assert_eq!(
            data.len(),
            height * width * channels * batch,
            "data length must equal height * width * channels * batch"
        );
        Tensor4 { height, width, channels, batch, data }
    }

    /// Uniform random fill in [-1, 1).
    pub fn random(height: usize, width: usize, channels: usize, batch: usize) -> Tensor4 {
        let mut rng = rand::thread_rng();
        let mut res = Tensor4::zeros(height, width, channels, batch);
        for v in res.data.iter_mut() {
            *v = rng.gen::<f64>() * 2.0 - 1.0;
        }
        res
    }

    pub fn len(&self) -> usize {
        self.data.len()
    }

    pub fn is_empty(&self) -> bool {
        self.data.is_empty()
    }

    pub fn same_shape(&self, other: &Tensor4) -> bool {
        self.height == other.height
            && self.width == other.width
            && self.channels == other.channels
            && self.batch == other.batch
    }

    #[inline]
    pub fn offset(&self, h: usize, w: usize, k: usize, n: usize) -> usize {
        debug_assert!(h < self.height && w < self.width && k < self.channels && n < self.batch);
        ((n * self.channels + k) * self.height + h) * self.width + w
    }

    #[inline]
    pub fn get(&self, h: usize, w: usize, k: usize, n: usize) -> f64 {
        self.data[self.offset(h, w, k, n)]
    }

    #[inline]
    pub fn set(&mut self, h: usize, w: usize, k: usize, n: usize, value: f64) {
        let i = self.offset(h, w, k, n);
        self.data[i] = value;
    }

    /// Copies the `channels` values at spatial location (h, w) of image `n`
    /// into `out`. `out` must have length `channels`.
    pub fn read_channels(&self, h: usize, w: usize, n: usize, out: &mut [f64]) {
        assert_eq!(out.len(), self.channels);
        for k in 0..self.channels {
            out[k] = self.data[self.offset(h, w, k, n)];
        }
    }

    pub fn map<F>(&self, functor: F) -> Tensor4
    where
        F: Fn(f64) -> f64,
    {
        Tensor4 {
            height: self.height,
            width: self.width,
            channels: self.channels,
            batch: self.batch,
            data: self.data.iter().map(|&x| functor(x)).collect(),
        }
    }
}

impl Default for Tensor4 {
    fn default() -> Self {
        Tensor4 { height: 0, width: 0, channels: 0, batch: 0, data: vec![] }
    }
}
