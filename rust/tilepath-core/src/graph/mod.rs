//! Generic weighted graph keyed by vertex payload equality.
//!
//! Vertices live in an arena and are addressed by [`VertexId`] handles. A
//! handle carries the slot generation, so a handle to a removed vertex never
//! resolves to whatever later reuses the slot. Edges are owned by their source
//! vertex and refer to the destination by handle only.

use std::hash::Hash;

use rustc_hash::FxHashMap;

use crate::engine::search::NeighborSource;
use crate::errors::GraphError;

#[derive(Copy, Clone, Debug, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct VertexId {
    index: u32,
    generation: u32,
}

impl VertexId {
    pub fn index(self) -> usize {
        self.index as usize
    }
}

#[derive(Clone, Debug, PartialEq)]
pub struct Edge<E> {
    pub to: VertexId,
    pub weight: f64,
    pub data: Option<E>,
}

#[derive(Clone, Debug)]
pub struct Vertex<V, E> {
    data: V,
    edges: Vec<Edge<E>>,
}

impl<V, E> Vertex<V, E> {
    pub fn data(&self) -> &V {
        &self.data
    }

    pub fn edges(&self) -> &[Edge<E>] {
        &self.edges
    }
}

#[derive(Clone, Debug)]
struct Slot<V, E> {
    generation: u32,
    vertex: Option<Vertex<V, E>>,
}

#[derive(Clone, Debug)]
pub struct Graph<V, E = ()>
where
    V: Eq + Hash + Clone,
{
    slots: Vec<Slot<V, E>>,
    free: Vec<u32>,
    index: FxHashMap<V, VertexId>,
    edge_count: usize,
}

impl<V, E> Default for Graph<V, E>
where
    V: Eq + Hash + Clone,
{
    fn default() -> Self {
        Self::new()
    }
}

impl<V, E> Graph<V, E>
where
    V: Eq + Hash + Clone,
{
    pub fn new() -> Self {
        Self::with_capacity(0)
    }

    pub fn with_capacity(vertices: usize) -> Self {
        let mut index = FxHashMap::default();
        index.reserve(vertices);
        Self { slots: Vec::with_capacity(vertices), free: Vec::new(), index, edge_count: 0 }
    }

    pub fn vertex_count(&self) -> usize {
        self.index.len()
    }

    pub fn edge_count(&self) -> usize {
        self.edge_count
    }

    pub fn is_empty(&self) -> bool {
        self.index.is_empty()
    }

    pub fn add_vertex(&mut self, data: V) -> Result<VertexId, GraphError> {
        if let Some(&existing) = self.index.get(&data) {
            return Err(GraphError::DuplicateVertex(existing));
        }
        Ok(self.insert_new(data))
    }

    /// Handle of the vertex carrying `data`, inserting it first if needed.
    pub fn get_or_add_vertex(&mut self, data: V) -> VertexId {
        match self.index.get(&data) {
            Some(&id) => id,
            None => self.insert_new(data),
        }
    }

    fn insert_new(&mut self, data: V) -> VertexId {
        let vertex = Vertex { data: data.clone(), edges: Vec::new() };
        let id = match self.free.pop() {
            Some(index) => {
                let slot = &mut self.slots[index as usize];
                slot.vertex = Some(vertex);
                VertexId { index, generation: slot.generation }
            }
            None => {
                let index = self.slots.len() as u32;
                self.slots.push(Slot { generation: 0, vertex: Some(vertex) });
                VertexId { index, generation: 0 }
            }
        };
        self.index.insert(data, id);
        id
    }

    /// Remove a vertex together with its own edges and every edge pointing at it.
    pub fn remove_vertex(&mut self, id: VertexId) -> Result<V, GraphError> {
        self.vertex(id).ok_or(GraphError::MissingVertex(id))?;
        let slot = &mut self.slots[id.index()];
        let vertex = slot.vertex.take().ok_or(GraphError::MissingVertex(id))?;
        slot.generation = slot.generation.wrapping_add(1);
        self.free.push(id.index);
        self.index.remove(&vertex.data);
        self.edge_count -= vertex.edges.len();

        let mut dropped = 0usize;
        for v in self.slots.iter_mut().filter_map(|s| s.vertex.as_mut()) {
            let before = v.edges.len();
            v.edges.retain(|e| e.to != id);
            dropped += before - v.edges.len();
        }
        self.edge_count -= dropped;
        Ok(vertex.data)
    }

    pub fn contains(&self, id: VertexId) -> bool {
        self.vertex(id).is_some()
    }

    pub fn vertex(&self, id: VertexId) -> Option<&Vertex<V, E>> {
        let slot = self.slots.get(id.index())?;
        if slot.generation != id.generation {
            return None;
        }
        slot.vertex.as_ref()
    }

    fn vertex_mut(&mut self, id: VertexId) -> Option<&mut Vertex<V, E>> {
        let slot = self.slots.get_mut(id.index())?;
        if slot.generation != id.generation {
            return None;
        }
        slot.vertex.as_mut()
    }

    pub fn data(&self, id: VertexId) -> Option<&V> {
        self.vertex(id).map(Vertex::data)
    }

    pub fn vertex_id(&self, data: &V) -> Option<VertexId> {
        self.index.get(data).copied()
    }

    /// Add or replace the directed edge `from → to`.
    pub fn add_edge(
        &mut self,
        from: VertexId,
        to: VertexId,
        weight: f64,
        data: Option<E>,
    ) -> Result<(), GraphError> {
        if !weight.is_finite() || weight < 0.0 {
            return Err(GraphError::InvalidWeight { weight });
        }
        if !self.contains(to) {
            return Err(GraphError::MissingVertex(to));
        }
        let vertex = self.vertex_mut(from).ok_or(GraphError::MissingVertex(from))?;
        match vertex.edges.iter_mut().find(|e| e.to == to) {
            Some(edge) => {
                edge.weight = weight;
                edge.data = data;
            }
            None => {
                vertex.edges.push(Edge { to, weight, data });
                self.edge_count += 1;
            }
        }
        Ok(())
    }

    pub fn add_undirected_edge(
        &mut self,
        a: VertexId,
        b: VertexId,
        weight: f64,
        data: Option<E>,
    ) -> Result<(), GraphError>
    where
        E: Clone,
    {
        if !self.contains(b) {
            return Err(GraphError::MissingVertex(b));
        }
        self.add_edge(a, b, weight, data.clone())?;
        self.add_edge(b, a, weight, data)
    }

    /// Remove the directed edge `from → to`; `Ok(false)` when there was none.
    pub fn remove_edge(&mut self, from: VertexId, to: VertexId) -> Result<bool, GraphError> {
        let vertex = self.vertex_mut(from).ok_or(GraphError::MissingVertex(from))?;
        let before = vertex.edges.len();
        vertex.edges.retain(|e| e.to != to);
        let removed = before != vertex.edges.len();
        if removed {
            self.edge_count -= 1;
        }
        Ok(removed)
    }

    pub fn edges(&self, id: VertexId) -> &[Edge<E>] {
        self.vertex(id).map(Vertex::edges).unwrap_or(&[])
    }

    pub fn edge_between(&self, from: VertexId, to: VertexId) -> Option<&Edge<E>> {
        self.edges(from).iter().find(|e| e.to == to)
    }

    /// Outgoing `(destination, weight)` pairs; empty for an unknown handle.
    pub fn neighbors(&self, id: VertexId) -> impl Iterator<Item = (VertexId, f64)> + '_ {
        self.edges(id).iter().map(|e| (e.to, e.weight))
    }

    pub fn vertices(&self) -> impl Iterator<Item = (VertexId, &V)> + '_ {
        self.slots.iter().enumerate().filter_map(|(i, slot)| {
            let id = VertexId { index: i as u32, generation: slot.generation };
            slot.vertex.as_ref().map(|v| (id, &v.data))
        })
    }
}

impl<V, E> NeighborSource for Graph<V, E>
where
    V: Eq + Hash + Clone,
{
    type Node = VertexId;

    fn neighbors(&self, node: VertexId, out: &mut Vec<(VertexId, f64)>) {
        out.extend(Graph::neighbors(self, node));
    }
}
