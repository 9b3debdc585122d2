mod test_store_lists;
mod test_store_tasks;
