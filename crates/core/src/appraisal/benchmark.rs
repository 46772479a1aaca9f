//! Benchmark test for appraisal throughput.

#[cfg(test)]
mod tests {
    use std::hint::black_box;
    use std::time::Instant;

    use rust_decimal::Decimal;

    use crate::appraisal::{AppraisalEngine, AppraisalInput};

    #[test]
    fn benchmark_100k_demo_appraisals() {
        let engine = AppraisalEngine::new();
        let input = AppraisalInput::demo();

        let start = Instant::now();
        for _ in 0..100_000 {
            black_box(engine.run(black_box(&input)));
        }
        let duration = start.elapsed();

        println!("\n=== BENCHMARK: 100,000 demo appraisals ===");
        println!("Duration: {duration:?}");
        assert!(
            duration.as_millis() < 5000,
            "Appraisals took {}ms, expected <5000ms",
            duration.as_millis()
        );
    }

    #[test]
    fn benchmark_varied_site_areas() {
        let engine = AppraisalEngine::new();

        let start = Instant::now();
        for area in 1..=10_000u32 {
            let input = AppraisalInput {
                area: Decimal::from(area),
                ..AppraisalInput::demo()
            };
            black_box(engine.run(&input));
        }
        let duration = start.elapsed();

        println!("\n=== BENCHMARK: 10,000 appraisals across site areas ===");
        println!("Duration: {duration:?}");
        assert!(
            duration.as_millis() < 2000,
            "Appraisals took {}ms, expected <2000ms",
            duration.as_millis()
        );
    }
}
