/// Creates a single gateway [`Message`](crate::Message) from a role shorthand.
///
/// ```rust
/// use gantry::{Role, gantry_msg};
///
/// let message = gantry_msg!(assistant => "Done.");
/// assert_eq!(message.role, Role::Assistant);
/// assert_eq!(message.content, "Done.");
/// ```
#[macro_export]
macro_rules! gantry_msg {
    (system => $content:expr $(,)?) => {
        $crate::Message::new($crate::Role::System, $content)
    };
    (user => $content:expr $(,)?) => {
        $crate::Message::new($crate::Role::User, $content)
    };
    (assistant => $content:expr $(,)?) => {
        $crate::Message::new($crate::Role::Assistant, $content)
    };
    ($role:ident => $content:expr $(,)?) => {
        compile_error!("unsupported role: use system, user, or assistant");
    };
}

/// Creates a `Vec<Message>` from role/content pairs.
///
/// ```rust
/// use gantry::{Role, format_messages_to_prompt, gantry_messages};
///
/// let messages = gantry_messages![
///     system => "be terse",
///     user => "2+2?",
/// ];
///
/// assert_eq!(messages[0].role, Role::System);
/// assert_eq!(
///     format_messages_to_prompt(&messages),
///     "System: be terse\nUser: 2+2?\nAssistant:"
/// );
/// ```
#[macro_export]
macro_rules! gantry_messages {
    () => {
        Vec::<$crate::Message>::new()
    };
    ($($role:ident => $content:expr),+ $(,)?) => {
        vec![$($crate::gantry_msg!($role => $content)),+]
    };
}
