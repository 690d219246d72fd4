//! Tests for the import commit path
