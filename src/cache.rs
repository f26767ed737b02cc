//! Direction-independent route cache.
//!
//! A leg and its reverse share one entry, so `A → B` and `B → A` always
//! render as the same polyline traversed in opposite directions. Keys are the
//! two endpoints rounded to a fixed number of decimals and sorted.
//!
//! At most one computation runs per key: a concurrent request for a key that
//! is being computed waits for it and then reads the stored entry.

use std::collections::HashMap;
use std::num::NonZeroUsize;
use std::sync::{Arc, Mutex, MutexGuard, PoisonError};
use std::time::{Duration, Instant};

use lru::LruCache;
use tracing::{debug, info};

use crate::config::CacheConfig;
use crate::pipeline::PlannedRoute;
use crate::polyline::{Polyline, Waypoint};

/// One endpoint rounded to the cache precision: `(lon, lat)` in units of
/// 10^-precision degrees.
type RoundedPoint = (i64, i64);

/// Canonical key: both rounded endpoints in sorted order.
type CacheKey = (RoundedPoint, RoundedPoint);

#[derive(Debug, Clone)]
struct Entry {
    planned: PlannedRoute,
    /// Rounded endpoint the cached route starts from.
    forward: RoundedPoint,
    inserted_at: Instant,
}

#[derive(Debug)]
pub struct RouteCache {
    precision_decimals: u32,
    ttl: Option<Duration>,
    entries: Mutex<LruCache<CacheKey, Entry>>,
    in_progress: Mutex<HashMap<CacheKey, Arc<Mutex<()>>>>,
}

fn lock<T>(mutex: &Mutex<T>) -> MutexGuard<'_, T> {
    mutex.lock().unwrap_or_else(PoisonError::into_inner)
}

impl RouteCache {
    pub fn new(config: &CacheConfig) -> Self {
        let capacity = NonZeroUsize::new(config.capacity).unwrap_or(NonZeroUsize::MIN);
        Self {
            precision_decimals: config.precision_decimals,
            ttl: config.ttl(),
            entries: Mutex::new(LruCache::new(capacity)),
            in_progress: Mutex::new(HashMap::new()),
        }
    }

    fn round(&self, point: Waypoint) -> RoundedPoint {
        let scale = 10f64.powi(self.precision_decimals as i32);
        ((point.lon * scale).round() as i64, (point.lat * scale).round() as i64)
    }

    fn key(&self, a: Waypoint, b: Waypoint) -> CacheKey {
        let (ra, rb) = (self.round(a), self.round(b));
        if ra <= rb { (ra, rb) } else { (rb, ra) }
    }

    /// Looks up the leg `a → b` without computing it.
    pub fn get(&self, a: Waypoint, b: Waypoint) -> Option<PlannedRoute> {
        self.lookup(&self.key(a, b), a, b)
    }

    fn lookup(&self, key: &CacheKey, a: Waypoint, b: Waypoint) -> Option<PlannedRoute> {
        let mut entries = lock(&self.entries);
        let expired = match entries.get(key) {
            None => return None,
            Some(entry) => self.ttl.is_some_and(|ttl| entry.inserted_at.elapsed() > ttl),
        };
        if expired {
            debug!(?a, ?b, "cache entry expired");
            entries.pop(key);
            return None;
        }

        let entry = entries.get(key)?;
        let mut planned = entry.planned.clone();
        if entry.forward != self.round(a) {
            planned.route = planned.route.reversed();
        }
        planned.route = with_exact_endpoints(planned.route, a, b);
        planned.diagnostics.from_cache = true;
        info!(?a, ?b, points = planned.route.len(), "route cache hit");
        Some(planned)
    }

    fn store(&self, key: CacheKey, a: Waypoint, planned: &PlannedRoute) {
        let entry = Entry {
            planned: planned.clone(),
            forward: self.round(a),
            inserted_at: Instant::now(),
        };
        lock(&self.entries).put(key, entry);
    }

    /// Returns the cached leg `a → b`, or computes and stores it.
    ///
    /// Errors from `compute` are returned and never cached.
    pub fn get_or_compute<F, E>(&self, a: Waypoint, b: Waypoint, compute: F) -> Result<PlannedRoute, E>
    where
        F: FnOnce(Waypoint, Waypoint) -> Result<PlannedRoute, E>,
    {
        let key = self.key(a, b);
        if let Some(hit) = self.lookup(&key, a, b) {
            return Ok(hit);
        }

        let gate = {
            let mut in_progress = lock(&self.in_progress);
            Arc::clone(in_progress.entry(key).or_default())
        };
        let guard = lock(&gate);

        // Another request may have filled the entry while we waited.
        let result = match self.lookup(&key, a, b) {
            Some(hit) => Ok(hit),
            None => {
                let computed = compute(a, b);
                if let Ok(planned) = &computed {
                    self.store(key, a, planned);
                }
                computed
            }
        };

        drop(guard);
        let mut in_progress = lock(&self.in_progress);
        if in_progress.get(&key).is_some_and(|current| Arc::ptr_eq(current, &gate)) {
            in_progress.remove(&key);
        }

        result
    }

    pub fn len(&self) -> usize {
        lock(&self.entries).len()
    }

    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }
}

/// Puts the caller's exact coordinates back on a cached route. The stored
/// endpoints differ from the request by less than the rounding step.
fn with_exact_endpoints(route: Polyline, a: Waypoint, b: Waypoint) -> Polyline {
    let mut points = route.into_points();
    if points.len() >= 2 {
        points[0] = a;
        let last = points.len() - 1;
        points[last] = b;
    }
    Polyline::new(points)
}
