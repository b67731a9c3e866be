//! Unit tests for the oracle gateway and response sanitiser.
