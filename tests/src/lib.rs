#![cfg(test)]

mod admin {
    mod integration;
}

mod validation {
    mod integration;
}
