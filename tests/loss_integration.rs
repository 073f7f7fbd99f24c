//! End-to-end tests: recorded-style signals through the public loss API.

mod helpers;

use ampfit::prelude::*;
use ampfit::{compute_esr, ConfigError, ShapeError};
use approx::assert_relative_eq;
use burn::prelude::*;
use helpers::tolerances::*;
use helpers::*;

fn device() -> <TestBackend as Backend>::Device {
    Default::default()
}

fn one_second_sine() -> Vec<f32> {
    tone(1000.0, 1.0, 1.0)
}

#[test]
fn test_sine_gain_error_is_small_but_nonzero() {
    let device = device();
    let target = one_second_sine();
    let output = scaled(&target, 0.9);

    let loss_fn = LossAggregator::<TestBackend>::builder(
        WeightedLossSpec::new().weighted(LossKind::Esr, 1.0),
    )
    .build(&device)
    .unwrap();

    let loss = scalar(
        &loss_fn
            .evaluate(
                &mono_signal(&output, &device),
                &mono_signal(&target, &device),
            )
            .unwrap(),
    );

    // (0.1)^2 of the target energy, shifted slightly by the epsilon.
    assert!(loss > 0.0);
    assert_relative_eq!(loss, 0.01, max_relative = 1e-2);
}

#[test]
fn test_identical_sines_give_zero_loss() {
    let device = device();
    let sine = mono_signal::<TestBackend>(&one_second_sine(), &device);

    let loss_fn = LossAggregator::<TestBackend>::builder(
        WeightedLossSpec::new()
            .weighted(LossKind::Esr, 0.5)
            .weighted(LossKind::EsrPre, 0.3)
            .weighted(LossKind::Dc, 0.2),
    )
    .pre_emphasis(vec![-0.95, 1.0])
    .low_pass(true)
    .build(&device)
    .unwrap();

    let loss = scalar(&loss_fn.evaluate(&sine, &sine).unwrap());
    assert!(loss.abs() < FLOAT_EPSILON, "loss = {loss}");
}

#[test]
fn test_weighted_sum_matches_terms() {
    let device = device();
    let target = noise(4096, 7);
    let output: Vec<f32> = target
        .iter()
        .zip(noise(4096, 8))
        .map(|(t, n)| t + 0.2 * n + 0.01)
        .collect();
    let (output, target) = (
        mono_signal::<TestBackend>(&output, &device),
        mono_signal::<TestBackend>(&target, &device),
    );

    let spec = WeightedLossSpec::new()
        .weighted(LossKind::Esr, 0.6)
        .weighted(LossKind::EsrPre, 0.3)
        .weighted(LossKind::Dc, 0.1);
    let loss_fn = LossAggregator::<TestBackend>::builder(spec.clone())
        .pre_emphasis(vec![-0.85, 1.0])
        .build(&device)
        .unwrap();

    let total = scalar(&loss_fn.evaluate(&output, &target).unwrap());
    let terms = loss_fn.evaluate_terms(&output, &target).unwrap();
    assert_eq!(terms.len(), 3);

    let expected: f32 = terms
        .iter()
        .map(|(kind, value)| spec.weight(*kind).unwrap_or(0.0) * scalar(value))
        .sum();
    assert_relative_eq!(total, expected, max_relative = REDUCTION_EPSILON);
}

#[test]
fn test_batches_are_pooled() {
    let device = device();
    let a = noise(2048, 1);
    let b = noise(2048, 2);
    let target = batch_signal::<TestBackend>(&[a.clone(), b.clone()], &device);
    let output = batch_signal::<TestBackend>(&[scaled(&a, 0.5), b.clone()], &device);

    let pooled = scalar(&compute_esr(&output, &target).unwrap());

    // Only the first item carries error: half of its energy is missing.
    let err_energy = energy(&scaled(&a, 0.5));
    let target_energy = (energy(&a) + energy(&b)) / 2.0;
    let expected = (err_energy / 2.0) / (target_energy + ampfit::EPSILON);
    assert_relative_eq!(pooled, expected, max_relative = 1e-3);
}

#[test]
fn test_multi_spec_sees_spectral_difference() {
    let device = device();
    let target = one_second_sine();
    let detuned = tone(1500.0, 1.0, 1.0);

    let loss_fn = LossAggregator::<TestBackend>::builder(
        WeightedLossSpec::new().with(LossKind::MultiSpec),
    )
    .fft_sizes(vec![512, 256])
    .build(&device)
    .unwrap();

    let same = scalar(
        &loss_fn
            .evaluate(
                &mono_signal(&target, &device),
                &mono_signal(&target, &device),
            )
            .unwrap(),
    );
    let different = scalar(
        &loss_fn
            .evaluate(
                &mono_signal(&detuned, &device),
                &mono_signal(&target, &device),
            )
            .unwrap(),
    );

    assert!(same.abs() < SPECTRAL_EPSILON);
    assert!(different > 1.0, "spectral loss = {different}");
}

#[test]
fn test_gradient_descent_recovers_gain() {
    let device = Default::default();
    let sine = one_second_sine();
    let input = mono_signal::<CpuBackend>(&sine, &device);
    let target = mono_signal::<CpuBackend>(&scaled(&sine, 0.5), &device);

    let loss_fn = LossAggregator::<CpuBackend>::builder(
        WeightedLossSpec::new()
            .weighted(LossKind::Esr, 0.8)
            .weighted(LossKind::Dc, 0.2),
    )
    .build(&device)
    .unwrap();

    let mut gain = 1.0_f32;
    for _ in 0..40 {
        let param = Tensor::<CpuBackend, 1>::from_floats([gain], &device).require_grad();
        let output = input.clone() * param.clone().reshape([1, 1, 1]);
        let grads = loss_fn.evaluate(&output, &target).unwrap().backward();
        let step = scalar(&param.grad(&grads).unwrap());
        gain -= 0.05 * step;
    }

    assert!((gain - 0.5).abs() < FIT_EPSILON, "gain = {gain}");
}

#[test]
fn test_shared_across_threads() {
    let device = device();
    let loss_fn = LossAggregator::<TestBackend>::builder(
        WeightedLossSpec::new().with(LossKind::Esr).with(LossKind::Dc),
    )
    .build(&device)
    .unwrap();
    let target = mono_signal::<TestBackend>(&noise(1024, 3), &device);
    let output = mono_signal::<TestBackend>(&noise(1024, 4), &device);
    let reference = scalar(&loss_fn.evaluate(&output, &target).unwrap());

    std::thread::scope(|scope| {
        let handles: Vec<_> = (0..4)
            .map(|_| scope.spawn(|| scalar(&loss_fn.evaluate(&output, &target).unwrap())))
            .collect();
        for handle in handles {
            assert_eq!(handle.join().unwrap(), reference);
        }
    });
}

#[test]
fn test_errors_surface_through_umbrella() {
    let device = device();

    let err =
        LossAggregator::<TestBackend>::builder(WeightedLossSpec::new().with(LossKind::EsrPre))
            .build(&device)
            .unwrap_err();
    assert_eq!(err, Error::Config(ConfigError::MissingPreEmphasis));

    let loss_fn =
        LossAggregator::<TestBackend>::builder(WeightedLossSpec::new().with(LossKind::Esr))
            .build(&device)
            .unwrap();
    let short = mono_signal::<TestBackend>(&vec![0.0; 100], &device);
    let long = mono_signal::<TestBackend>(&vec![0.0; 200], &device);
    assert_eq!(
        loss_fn.evaluate(&short, &long).unwrap_err(),
        Error::Shape(ShapeError::Mismatch {
            output: vec![100, 1, 1],
            target: vec![200, 1, 1],
        })
    );
}
