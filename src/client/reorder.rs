/// Moves the element at `from` so it ends up at `to`, shifting the rest.
///
/// Indices outside the list leave it untouched.
pub fn reorder<T>(mut list: Vec<T>, from: usize, to: usize) -> Vec<T> {
    if from >= list.len() || to >= list.len() || from == to {
        return list;
    }
    let moved = list.remove(from);
    list.insert(to, moved);
    list
}
