mod test_spawn;
