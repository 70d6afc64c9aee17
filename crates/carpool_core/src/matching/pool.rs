//! Per-call driver route pool: shuffle once, pop until empty, then fall back
//! to random draws. Each match call owns its pool, so concurrent calls never
//! share shuffle state.

use log::debug;
use rand::seq::SliceRandom;
use rand::Rng;

use crate::network::Route;

/// Shuffled copy of `routes`; the input is left untouched.
pub fn shuffle<R: Rng>(routes: &[Route], rng: &mut R) -> Vec<Route> {
    let mut shuffled = routes.to_vec();
    shuffled.shuffle(rng);
    shuffled
}

#[derive(Debug, Clone)]
pub struct RoutePool {
    remaining: Vec<Route>,
    all: Vec<Route>,
}

impl RoutePool {
    pub fn shuffled<R: Rng>(routes: Vec<Route>, rng: &mut R) -> Self {
        Self {
            remaining: shuffle(&routes, rng),
            all: routes,
        }
    }

    pub fn remaining(&self) -> usize {
        self.remaining.len()
    }

    /// Next route from the shuffled order, or any route once exhausted.
    /// `None` only for an empty pool.
    pub fn draw<R: Rng>(&mut self, rng: &mut R) -> Option<Route> {
        if let Some(route) = self.remaining.pop() {
            return Some(route);
        }
        debug!("route pool exhausted, drawing at random");
        self.all.choose(rng).cloned()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use rand::rngs::StdRng;
    use rand::SeedableRng;

    fn routes() -> Vec<Route> {
        (0..4)
            .map(|i| Route::from(&[format!("o{i}").as_str(), "HUB"][..]))
            .collect()
    }

    #[test]
    fn shuffle_is_a_permutation_and_pure() {
        let mut rng = StdRng::seed_from_u64(7);
        let original = routes();
        let mut shuffled = shuffle(&original, &mut rng);
        assert_eq!(original, routes());
        shuffled.sort_by(|a, b| a.origin().cmp(&b.origin()));
        assert_eq!(shuffled, original);
    }

    #[test]
    fn draws_every_route_once_then_falls_back() {
        let mut rng = StdRng::seed_from_u64(7);
        let mut pool = RoutePool::shuffled(routes(), &mut rng);
        let mut drawn: Vec<Route> = (0..4).filter_map(|_| pool.draw(&mut rng)).collect();
        assert_eq!(pool.remaining(), 0);
        drawn.sort_by(|a, b| a.origin().cmp(&b.origin()));
        assert_eq!(drawn, routes());
        let extra = pool.draw(&mut rng).expect("fallback draw");
        assert!(routes().contains(&extra));
    }

    #[test]
    fn empty_pool_draws_nothing() {
        let mut rng = StdRng::seed_from_u64(7);
        let mut pool = RoutePool::shuffled(Vec::new(), &mut rng);
        assert_eq!(pool.draw(&mut rng), None);
    }
}
