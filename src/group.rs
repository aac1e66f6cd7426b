//! Stitching loose segments back together into polylines.
//!
//! After hidden-line removal we're left with a bag of segments. Plotting
//! them one at a time would lift the pen after every one of them, so we join
//! up the ones that share endpoints.
//!
//! We treat the segments as the edges of a graph whose vertices are the
//! segment endpoints (with endpoints that are within `eps` of one another
//! identified). Every maximal chain of edges through vertices of degree two
//! becomes one polyline. A vertex where three or more segments meet always
//! breaks the chains passing through it, because there's no principled way
//! to decide which branches belong together.

use std::collections::HashMap;

use crate::{
    geom::{Point, Segment},
    polyline::Polyline,
};

/// An index into the vertices of a [`SegmentGraph`].
#[derive(Clone, Copy, PartialOrd, Ord, PartialEq, Eq, Hash)]
pub struct VertexIdx(usize);

#[derive(Clone)]
struct VertexVec<T> {
    inner: Vec<T>,
}

impl_typed_vec!(VertexVec, VertexIdx, "v");

/// An index into the edges of a [`SegmentGraph`].
#[derive(Clone, Copy, PartialOrd, Ord, PartialEq, Eq, Hash)]
pub struct EdgeIdx(usize);

#[derive(Clone)]
struct EdgeVec<T> {
    inner: Vec<T>,
}

impl_typed_vec!(EdgeVec, EdgeIdx, "e");

/// The connectivity of a collection of segments.
#[derive(Clone, Debug)]
pub struct SegmentGraph {
    /// For each vertex, the first point that we saw there. Every other point
    /// that got identified with this vertex is within `eps` of it.
    points: VertexVec<Point>,
    /// The endpoints of each edge, in the direction of the original segment.
    edges: EdgeVec<[VertexIdx; 2]>,
    /// For each vertex, the edges that touch it (in the order they were added).
    incident: VertexVec<Vec<EdgeIdx>>,
    eps: f64,
    /// Buckets of vertices, keyed by their position on an `eps`-sized grid.
    grid: HashMap<(i64, i64), Vec<VertexIdx>>,
}

impl SegmentGraph {
    /// Builds the graph of `segments`, identifying endpoints that are within `eps`.
    ///
    /// Segments whose two ends get identified are dropped, since they'd
    /// be drawn as a single point anyway.
    pub fn new<'a>(segments: impl IntoIterator<Item = &'a Segment>, eps: f64) -> Self {
        debug_assert!(eps >= 0.0);
        let mut ret = SegmentGraph {
            points: VertexVec::default(),
            edges: EdgeVec::default(),
            incident: VertexVec::default(),
            eps: eps.max(f64::MIN_POSITIVE),
            grid: HashMap::new(),
        };

        for seg in segments {
            let v0 = ret.vertex(seg.p0);
            let v1 = ret.vertex(seg.p1);
            if v0 == v1 {
                continue;
            }
            let e = ret.edges.push([v0, v1]);
            ret.incident[v0].push(e);
            ret.incident[v1].push(e);
        }
        ret
    }

    fn cell(&self, p: Point) -> (i64, i64) {
        (
            (p.x / self.eps).floor() as i64,
            (p.y / self.eps).floor() as i64,
        )
    }

    /// Finds the vertex at `p`, creating one if necessary.
    fn vertex(&mut self, p: Point) -> VertexIdx {
        let (cx, cy) = self.cell(p);
        for x in cx.saturating_sub(1)..=cx.saturating_add(1) {
            for y in cy.saturating_sub(1)..=cy.saturating_add(1) {
                if let Some(bucket) = self.grid.get(&(x, y)) {
                    if let Some(&v) = bucket.iter().find(|&&v| self.points[v].close_to(&p, self.eps)) {
                        return v;
                    }
                }
            }
        }

        let v = self.points.push(p);
        self.incident.push(Vec::new());
        self.grid.entry((cx, cy)).or_default().push(v);
        v
    }

    /// The number of distinct vertices.
    pub fn vertex_count(&self) -> usize {
        self.points.len()
    }

    /// The number of (non-degenerate) edges.
    pub fn edge_count(&self) -> usize {
        self.edges.len()
    }

    /// How many edges meet at `v`?
    pub fn degree(&self, v: VertexIdx) -> usize {
        self.incident[v].len()
    }

    fn other_end(&self, e: EdgeIdx, v: VertexIdx) -> VertexIdx {
        let [a, b] = self.edges[e];
        if a == v {
            b
        } else {
            debug_assert_eq!(b, v);
            a
        }
    }

    /// Walks from `start` along `first`, and keeps going for as long as we
    /// pass through vertices of degree two.
    fn walk(&self, start: VertexIdx, first: EdgeIdx, used: &mut EdgeVec<bool>) -> Polyline {
        let mut points = vec![self.points[start]];
        let mut cur = start;
        let mut edge = first;
        loop {
            used[edge] = true;
            let next = self.other_end(edge, cur);
            points.push(self.points[next]);
            if self.degree(next) != 2 {
                break;
            }
            let Some(&e) = self.incident[next].iter().find(|&&e| e != edge && !used[e]) else {
                break;
            };
            cur = next;
            edge = e;
        }
        Polyline::from_points_unchecked(points)
    }

    /// Joins the edges into as few polylines as possible without ever
    /// continuing through a branch point.
    ///
    /// Every edge ends up in exactly one polyline. Chains that close up on
    /// themselves come out as closed polylines (the first point repeated at
    /// the end).
    pub fn polylines(&self) -> Vec<Polyline> {
        let mut used = EdgeVec::<bool>::with_size(self.edges.len());
        let mut ret = Vec::new();

        // Open chains start and end at vertices that don't have degree two.
        for v in self.points.indices() {
            if self.degree(v) == 2 {
                continue;
            }
            for &e in &self.incident[v] {
                if !used[e] {
                    ret.push(self.walk(v, e, &mut used));
                }
            }
        }

        // Everything that remains is a loop through degree-two vertices.
        for e in self.edges.indices() {
            if !used[e] {
                ret.push(self.walk(self.edges[e][0], e, &mut used));
            }
        }

        ret
    }
}

/// Joins segments that share endpoints (up to `eps`) into polylines.
///
/// The order of the input doesn't affect which polylines come out, only the
/// order (and direction) in which they're produced.
pub fn group_segments<'a>(segments: impl IntoIterator<Item = &'a Segment>, eps: f64) -> Vec<Polyline> {
    let graph = SegmentGraph::new(segments, eps);
    let ret = graph.polylines();
    log::debug!(
        "grouped {} segments ({} vertices) into {} polylines",
        graph.edge_count(),
        graph.vertex_count(),
        ret.len()
    );
    ret
}
