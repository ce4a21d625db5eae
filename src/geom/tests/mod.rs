mod test_aligned_cubic_basic;
mod test_drawing_basic;
