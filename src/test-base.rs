// expression base test suite (included at the bottom of base.rs)
