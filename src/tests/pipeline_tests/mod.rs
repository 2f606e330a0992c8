mod list_fetch_tests;
