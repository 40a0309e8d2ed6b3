use criterion::{black_box, criterion_group, criterion_main, BenchmarkId, Criterion, Throughput};
use emg_conditioning::batch::clean_channels;
use emg_conditioning::config::EmgCleaningConfig;
use emg_conditioning::processing::filters::{butterworth_bandpass, filtfilt};
use emg_conditioning::{
    clean_semg, detect_activity, estimate_mvc, hampel, moving_rms_centered, moving_rms_shrinking,
    FilterSpec,
};
use ndarray::Array2;
use rand::rngs::StdRng;
use rand::{Rng, SeedableRng};

const SAMPLE_RATE_HZ: f64 = 2000.0;
const SIGNAL_LENGTHS: &[usize] = &[1_000, 10_000, 100_000];
const CHANNEL_COUNTS: &[usize] = &[1, 4, 16];

fn noise(n: usize) -> Vec<f64> {
    let mut rng = StdRng::seed_from_u64(0xE3C);
    (0..n).map(|_| rng.gen_range(-1.0..1.0)).collect()
}

fn benchmark_filtering(c: &mut Criterion) {
    let mut group = c.benchmark_group("filtering");
    let spec = FilterSpec::new(50.0, 500.0, 4, SAMPLE_RATE_HZ);

    group.bench_function("butterworth_design", |b| {
        b.iter(|| butterworth_bandpass(black_box(&spec)))
    });

    let tf = butterworth_bandpass(&spec).unwrap();
    for &len in SIGNAL_LENGTHS {
        let signal = noise(len);
        group.throughput(Throughput::Elements(len as u64));
        group.bench_with_input(BenchmarkId::new("filtfilt", len), &signal, |b, s| {
            b.iter(|| filtfilt(&tf, black_box(s)))
        });
    }
    group.finish();
}

fn benchmark_envelopes(c: &mut Criterion) {
    let mut group = c.benchmark_group("envelopes");

    for &len in SIGNAL_LENGTHS {
        let rectified: Vec<f64> = noise(len).iter().map(|x| x.abs()).collect();
        group.throughput(Throughput::Elements(len as u64));

        group.bench_with_input(BenchmarkId::new("rms_centered", len), &rectified, |b, s| {
            b.iter(|| moving_rms_centered(black_box(s), 100))
        });
        group.bench_with_input(BenchmarkId::new("rms_shrinking", len), &rectified, |b, s| {
            b.iter(|| moving_rms_shrinking(black_box(s), 3))
        });
    }

    // Hampel is O(n * w); keep it to the shorter signals
    for &len in &SIGNAL_LENGTHS[..2] {
        let signal = noise(len);
        group.bench_with_input(BenchmarkId::new("hampel_101", len), &signal, |b, s| {
            b.iter(|| hampel(black_box(s), 101, 3.0))
        });
    }
    group.finish();
}

fn benchmark_pipelines(c: &mut Criterion) {
    let mut group = c.benchmark_group("pipelines");
    let signal = noise(10_000);
    group.throughput(Throughput::Elements(signal.len() as u64));

    group.bench_function("clean_semg", |b| {
        b.iter(|| clean_semg(black_box(&signal), SAMPLE_RATE_HZ, 50.0, 50.0))
    });
    group.bench_function("estimate_mvc", |b| {
        b.iter(|| estimate_mvc(black_box(&signal)))
    });
    group.bench_function("detect_activity", |b| {
        b.iter(|| detect_activity(black_box(&signal), SAMPLE_RATE_HZ, 0.080, 0.200))
    });
    group.finish();
}

fn benchmark_batch(c: &mut Criterion) {
    let mut group = c.benchmark_group("batch");
    let config = EmgCleaningConfig {
        hampel_window_ms: 10.0,
        ..EmgCleaningConfig::default()
    };

    for &channels in CHANNEL_COUNTS {
        let flat = noise(channels * 4_000);
        let data = Array2::from_shape_vec((channels, 4_000), flat).unwrap();
        group.throughput(Throughput::Elements((channels * 4_000) as u64));

        group.bench_with_input(BenchmarkId::new("clean_channels", channels), &data, |b, d| {
            b.iter(|| clean_channels(black_box(d.view()), SAMPLE_RATE_HZ, &config))
        });
    }
    group.finish();
}

criterion_group!(
    benches,
    benchmark_filtering,
    benchmark_envelopes,
    benchmark_pipelines,
    benchmark_batch
);
criterion_main!(benches);
