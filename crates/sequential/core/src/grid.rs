//! Dense row-major matrix used for parallel stopping outcomes.

use std::ops::{Index, IndexMut};

#[derive(Clone, Debug, PartialEq, Eq)]
pub struct Grid<T> {
    height: usize,
    width: usize,
    cells: Vec<T>,
}

impl<T: Copy> Grid<T> {
    /// `height x width` grid with every cell set to `value`.
    pub fn filled(height: usize, width: usize, value: T) -> Self {
        Self {
            height,
            width,
            cells: vec![value; height * width],
        }
    }

    pub fn height(&self) -> usize {
        self.height
    }

    pub fn width(&self) -> usize {
        self.width
    }

    pub fn get(&self, row: usize, column: usize) -> Option<T> {
        if row < self.height && column < self.width {
            Some(self.cells[row * self.width + column])
        } else {
            None
        }
    }

    pub fn row(&self, row: usize) -> &[T] {
        &self.cells[row * self.width..(row + 1) * self.width]
    }

    /// Overwrite every cell.
    pub fn fill(&mut self, value: T) {
        self.cells.iter_mut().for_each(|c| *c = value);
    }

    pub fn to_rows(&self) -> Vec<Vec<T>> {
        (0..self.height).map(|i| self.row(i).to_vec()).collect()
    }
}

impl<T> Index<(usize, usize)> for Grid<T> {
    type Output = T;

    fn index(&self, (row, column): (usize, usize)) -> &T {
        assert!(column < self.width, "column {column} out of bounds");
        &self.cells[row * self.width + column]
    }
}

impl<T> IndexMut<(usize, usize)> for Grid<T> {
    fn index_mut(&mut self, (row, column): (usize, usize)) -> &mut T {
        assert!(column < self.width, "column {column} out of bounds");
        &mut self.cells[row * self.width + column]
    }
}

impl<T: PartialEq> PartialEq<Vec<Vec<T>>> for Grid<T> {
    fn eq(&self, rows: &Vec<Vec<T>>) -> bool {
        rows.len() == self.height
            && rows
                .iter()
                .enumerate()
                .all(|(i, r)| r.as_slice() == &self.cells[i * self.width..(i + 1) * self.width])
    }
}
