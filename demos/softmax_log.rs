use convloss::{loss_backward, loss_forward, LossConfig, LossType, Tensor4};

fn main() {
    // A batch of 4 images, each scored over 10 categories at a single
    // location, as a classifier head would produce.
    let x = Tensor4::random(1, 1, 10, 4);
    let labels = Tensor4::from_data(1, 1, 1, 4, vec![3.0, 1.0, 7.0, 10.0]);

    let cfg = LossConfig::new(LossType::SoftmaxLog);
    let loss = loss_forward(&x, &labels, &cfg);
    println!("softmax log loss over the batch: {loss:.4}");

    // Mean instead of sum: fold 1/N into per-image instance weights.
    let mut mean_cfg = cfg.clone();
    mean_cfg.instance_weights = Some(Tensor4::filled(1, 1, 1, 4, 1.0 / 4.0));
    println!("mean per image:                  {:.4}", loss_forward(&x, &labels, &mean_cfg));

    // Gradient with respect to the scores, upstream gradient 1.
    let grad = loss_backward(&x, &labels, 1.0, &cfg);
    for n in 0..4 {
        let true_class = labels.get(0, 0, 0, n) as usize - 1;
        println!(
            "image {n}: d(loss)/d(score of true class {}) = {:+.4}",
            true_class + 1,
            grad.get(0, 0, true_class, n)
        );
    }

    // The classification error on the same predictions.
    let err_cfg = LossConfig::new(LossType::ClassError);
    println!("top-1 errors in the batch:       {}", loss_forward(&x, &labels, &err_cfg));
}
