use deg_analysis::methods::Method;
use deg_analysis::pipeline::{analyze_cohort, AnalysisRequest};
use deg_analysis::report::build_report;
use pv_data::store::{CachingStore, MemoryStore};
use pv_data::utils::generate_cohort;
use pv_data::{SystemId, ValidBounds};

fn main() -> Result<(), Box<dyn std::error::Error>> {
    env_logger::init();

    println!("Degradation Analysis: Basic Example");
    println!("===================================\n");

    // Synthesize a small cohort in place of the external store
    let (metadata, series) = generate_cohort(5, 3 * 365);
    let mut inner = MemoryStore::new();
    for meta in &metadata {
        inner.add_metadata(meta.clone());
    }
    for (id, s) in series {
        inner.add_series(id, s);
    }
    let mut store = CachingStore::new(inner, 32);

    // Admit daylight samples with plausible production
    let request = AnalysisRequest {
        system_ids: (1..=5).map(SystemId).collect(),
        bounds: ValidBounds::new(200.0, 1400.0, 0.0, 2.0)?,
        methods: vec![Method::Ols, Method::RollingMean, Method::Yoy],
    };

    println!(
        "Analyzing {} systems with {} methods...\n",
        request.system_ids.len(),
        request.methods.len()
    );
    let analysis = analyze_cohort(&mut store, &request)?;

    for (method, rates) in &analysis.rates {
        println!("{}:", method);
        for (id, rate) in rates {
            println!("  system {}: {:+.5} Wh/W/year", id, rate);
        }
        println!();
    }

    let metadata = store.get_metadata()?.to_vec();
    let report = build_report(&analysis, &metadata)?;
    for summary in &report.summaries {
        println!("{}", summary);
    }

    Ok(())
}
