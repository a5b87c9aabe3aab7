use convloss::{loss_backward, loss_forward, LossConfig, LossType, Tensor4};

fn main() {
    // Dense prediction: an 8×8 score map over 3 classes for 2 images, with
    // one label per pixel, as a segmentation network would produce.
    let (height, width, classes, batch) = (8, 8, 3, 2);
    let x = Tensor4::random(height, width, classes, batch);

    // Checkerboard ground truth with an unlabeled border (label 0 = ignore).
    let mut labels = Tensor4::zeros(height, width, 1, batch);
    for n in 0..batch {
        for h in 1..height - 1 {
            for w in 1..width - 1 {
                labels.set(h, w, 0, n, ((h + w) % classes) as f64 + 1.0);
            }
        }
    }

    // Down-weight the dominant background class.
    let mut cfg = LossConfig::new(LossType::SoftmaxLog);
    cfg.class_weights = Some(vec![0.25, 1.0, 1.0]);

    let loss = loss_forward(&x, &labels, &cfg);
    let labeled = labels.data.iter().filter(|&&l| l != 0.0).count();
    println!("labeled pixels: {labeled} of {}", labels.len());
    println!("weighted softmax log loss: {loss:.4}");

    let grad = loss_backward(&x, &labels, 1.0, &cfg);
    let border_grad: f64 = (0..classes).map(|k| grad.get(0, 0, k, 0).abs()).sum();
    println!("gradient magnitude at an ignored border pixel: {border_grad}");

    // Pixel-level error rate (instance weights turn the sum into a mean).
    let mut err_cfg = LossConfig::new(LossType::ClassError);
    err_cfg.instance_weights = Some(Tensor4::filled(height, width, 1, batch, 1.0 / labeled as f64));
    println!("mean pixel error on labeled pixels: {:.4}", loss_forward(&x, &labels, &err_cfg));
}
