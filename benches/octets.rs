use std::hint::black_box;

use criterion::Criterion;
use criterion::Throughput;
use fixed_int64::FixedInt64;
use fixed_int64::Int64View;
use fixed_int64::Octets64;
use rand::SeedableRng;
use rand::rngs::StdRng;
use rand::seq::SliceRandom;

const OCTETS: u64 = fixed_int64::OCTETS as u64;

#[allow(clippy::cast_precision_loss)]
fn benchmark_octets(criterion: &mut Criterion, name: &str, mut values: Vec<i64>) {
    // Shuffle the values in a stable order.
    values.shuffle(&mut StdRng::seed_from_u64(0));
    let name = format!("fixed_int64/{name}");
    let bytes = values.len() as u64 * OCTETS;

    criterion
        .benchmark_group(&name)
        .bench_function("from_number", {
            let numbers: Vec<f64> = values.iter().map(|&v| v as f64).collect();
            move |b| {
                b.iter(|| {
                    for &n in &numbers {
                        black_box(FixedInt64::from_number(n).ok());
                    }
                });
            }
        })
        .throughput(Throughput::Bytes(bytes));

    criterion
        .benchmark_group(&name)
        .bench_function("to_number", {
            let encoded: Vec<FixedInt64> = values.iter().copied().map(FixedInt64::from).collect();
            move |b| {
                b.iter(|| {
                    let mut sum = 0.0;
                    for v in &encoded {
                        sum += v.to_number(true);
                    }
                    black_box(sum);
                });
            }
        })
        .throughput(Throughput::Bytes(bytes));

    criterion
        .benchmark_group(&name)
        .bench_function("view_compare", {
            let mut wire = Vec::with_capacity(values.len() * 8);
            for &v in &values {
                wire.extend_from_slice(&v.to_be_bytes());
            }
            move |b| {
                b.iter(|| {
                    let mut less = 0usize;
                    for pair in wire.chunks_exact(16) {
                        let (Ok(x), Ok(y)) = (Int64View::new(pair, 0), Int64View::new(pair, 8))
                        else {
                            continue;
                        };
                        less += usize::from(x < y);
                    }
                    black_box(less);
                });
            }
        })
        .throughput(Throughput::Bytes(bytes));

    criterion
        .benchmark_group(&name)
        .bench_function("octet_string", {
            let encoded: Vec<FixedInt64> = values.iter().copied().map(FixedInt64::from).collect();
            move |b| {
                b.iter(|| {
                    for v in &encoded {
                        black_box(v.to_octet_string(""));
                    }
                });
            }
        })
        .throughput(Throughput::Bytes(bytes));
}

fn main() {
    let mut criterion = Criterion::default().configure_from_args();

    // Magnitudes that stay exact in f64.
    benchmark_octets(
        &mut criterion,
        "safe",
        (0..1000).map(|i| i * 7_919 - 3_000_000).collect(),
    );
    // Full-width values around the sign boundary.
    benchmark_octets(
        &mut criterion,
        "wide",
        (0..1000).map(|i: i64| i.wrapping_mul(0x0123_4567_89ab_cdef)).collect(),
    );

    criterion.final_summary();
}
