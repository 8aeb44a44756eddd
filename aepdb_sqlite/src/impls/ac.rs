mod account;
mod meta;
mod privilege;
