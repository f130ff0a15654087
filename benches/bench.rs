use driftsim::market::Market;
use rand::SeedableRng;
use rand::rngs::StdRng;

fn main() {
    divan::main()
}

#[divan::bench]
fn update_builtin_market(bencher: divan::Bencher) {
    let mut market = Market::builtin().expect("Failed to build market");
    let mut rng = StdRng::seed_from_u64(0);
    bencher.bench_local(|| market.update(&mut rng));
}
