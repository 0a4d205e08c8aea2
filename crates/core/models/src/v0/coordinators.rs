auto_derived!(
    /// Regional coordinator contact entry
    pub struct Coordinator {
        /// Region this coordinator is responsible for
        pub region: String,
        /// Coordinator's display name
        pub name: String,
        /// Direct phone line
        pub phone: String,
        /// Contact email address
        pub email: String,
    }
);
