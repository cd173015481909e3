//! Adaptive Huffman coding.
//!
//! The model keeps a running weight per symbol and periodically rebuilds a
//! Huffman tree from scratch. Encoder and decoder apply the same updates in
//! the same order, so both sides always hold an identical tree without any
//! table ever being transmitted.
//!
//! Tree construction is fully deterministic for a given weight vector:
//! symbols are insertion-sorted by descending weight (ties keep ascending
//! symbol order), then the two last (lightest) nodes are merged repeatedly,
//! the merged node being re-inserted behind every node of equal or greater
//! weight. The second-to-last node becomes the left (`0`) child.

use crate::mode::constants::{
    EAGER_REBUILD_LIMIT, INITIAL_WEIGHT, REBUILD_INTERVAL, WEIGHT_INCREMENT,
};
use oxiurl_core::BitUnpacker;

/// Node in the tree arena. Leaves occupy ids `0..symbol_count`.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum Node {
    /// A symbol.
    Leaf(u16),
    /// Internal node with arena ids of its children.
    Internal { left: usize, right: usize },
}

/// A prefix code: the low `len` bits of `bits`, most significant first.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct Code {
    /// Code bits, right-aligned.
    pub bits: u64,
    /// Code length in bits.
    pub len: u8,
}

impl Code {
    /// Extend the code by one bit.
    fn child(self, bit: bool) -> Self {
        // Depth d needs a total weight of roughly Fib(d) quarter units, so 64
        // bits cover inputs of far more than 10^12 symbols.
        debug_assert!(self.len < 64, "Huffman code longer than 64 bits");
        Self {
            bits: (self.bits << 1) | u64::from(bit),
            len: self.len + 1,
        }
    }
}

/// Per-symbol codes derived from one [`HuffmanTree`].
#[derive(Debug, Clone)]
pub struct CodeTable {
    codes: Vec<Code>,
}

impl CodeTable {
    /// Get the code of `symbol`.
    pub fn get(&self, symbol: u16) -> Code {
        self.codes[usize::from(symbol)]
    }

    /// Number of symbols covered.
    pub fn len(&self) -> usize {
        self.codes.len()
    }

    /// Check whether the table is empty.
    pub fn is_empty(&self) -> bool {
        self.codes.is_empty()
    }
}

/// Huffman tree stored as an arena of nodes.
#[derive(Debug, Clone)]
pub struct HuffmanTree {
    nodes: Vec<Node>,
    root: usize,
    symbol_count: usize,
}

impl HuffmanTree {
    /// Build a tree from per-symbol weights (at least two symbols).
    pub fn build(weights: &[u64]) -> Self {
        debug_assert!(weights.len() >= 2, "a Huffman tree needs two symbols");

        let capacity = (weights.len() * 2).saturating_sub(1);
        let mut nodes = Vec::with_capacity(capacity);
        let mut node_weights = Vec::with_capacity(capacity);
        // Node ids sorted by descending weight.
        let mut order: Vec<usize> = Vec::with_capacity(weights.len());

        for (symbol, &weight) in weights.iter().enumerate() {
            nodes.push(Node::Leaf(symbol as u16));
            node_weights.push(weight);
            insert_sorted(&mut order, &node_weights, symbol);
        }

        while let [.., left, right] = *order.as_slice() {
            order.truncate(order.len() - 2);

            let id = nodes.len();
            nodes.push(Node::Internal { left, right });
            node_weights.push(node_weights[left] + node_weights[right]);
            insert_sorted(&mut order, &node_weights, id);
        }

        Self {
            nodes,
            root: order.first().copied().unwrap_or(0),
            symbol_count: weights.len(),
        }
    }

    /// Number of symbols in the tree.
    pub fn symbol_count(&self) -> usize {
        self.symbol_count
    }

    /// Decode one symbol by walking the tree bit by bit (`0` left, `1` right).
    ///
    /// Returns `None` if the input runs out before a leaf is reached.
    pub fn decode(&self, reader: &mut BitUnpacker<'_>) -> Option<u16> {
        let mut node = self.root;
        loop {
            match self.nodes[node] {
                Node::Leaf(symbol) => return Some(symbol),
                Node::Internal { left, right } => {
                    node = if reader.next_bit()? { right } else { left };
                }
            }
        }
    }

    /// Derive the code of every symbol from the current tree shape.
    pub fn code_table(&self) -> CodeTable {
        let mut codes = vec![Code::default(); self.symbol_count];
        let mut stack = vec![(self.root, Code::default())];

        while let Some((node, code)) = stack.pop() {
            match self.nodes[node] {
                Node::Leaf(symbol) => codes[usize::from(symbol)] = code,
                Node::Internal { left, right } => {
                    stack.push((right, code.child(true)));
                    stack.push((left, code.child(false)));
                }
            }
        }

        CodeTable { codes }
    }
}

/// Insert `id` behind every node whose weight is not lighter.
fn insert_sorted(order: &mut Vec<usize>, weights: &[u64], id: usize) {
    let weight = weights[id];
    let lighter = order
        .iter()
        .rev()
        .take_while(|&&other| weights[other] < weight)
        .count();
    order.insert(order.len() - lighter, id);
}

/// Frequency model with the rebuild schedule shared by encoder and decoder.
#[derive(Debug, Clone)]
pub struct AdaptiveHuffman {
    /// Per-symbol weight in quarter units.
    weights: Vec<u64>,
    /// Tree built from the weights at the last rebuild.
    tree: HuffmanTree,
    /// Symbols coded so far.
    symbols_coded: usize,
}

impl AdaptiveHuffman {
    /// Create a model over `symbol_count` symbols with uniform initial weights.
    pub fn new(symbol_count: usize) -> Self {
        let weights = vec![INITIAL_WEIGHT; symbol_count];
        let tree = HuffmanTree::build(&weights);
        Self {
            weights,
            tree,
            symbols_coded: 0,
        }
    }

    /// Get the current tree.
    pub fn tree(&self) -> &HuffmanTree {
        &self.tree
    }

    /// Number of symbols coded so far.
    pub fn symbols_coded(&self) -> usize {
        self.symbols_coded
    }

    /// Current weight of `symbol`, in quarter units.
    pub fn weight(&self, symbol: u16) -> u64 {
        self.weights[usize::from(symbol)]
    }

    /// Whether the tree is rebuilt once `symbols_coded` symbols have been coded.
    pub fn needs_rebuild(symbols_coded: usize) -> bool {
        symbols_coded < EAGER_REBUILD_LIMIT || symbols_coded % REBUILD_INTERVAL == 0
    }

    /// Count one occurrence of `symbol` and rebuild the tree when due.
    ///
    /// Returns `true` if the tree was rebuilt, in which case any
    /// [`CodeTable`] derived from the previous tree is stale.
    pub fn update(&mut self, symbol: u16) -> bool {
        self.weights[usize::from(symbol)] += WEIGHT_INCREMENT;
        self.symbols_coded += 1;

        if !Self::needs_rebuild(self.symbols_coded) {
            return false;
        }

        self.tree = HuffmanTree::build(&self.weights);
        tracing::trace!(symbols_coded = self.symbols_coded, "rebuilt Huffman tree");
        true
    }
}
