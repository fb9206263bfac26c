mod domain_attempt_state;
mod domain_classification;
mod domain_hashing;
