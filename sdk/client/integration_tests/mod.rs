mod helpers;

mod auth;
mod platforms;
mod posts;
mod retry;
